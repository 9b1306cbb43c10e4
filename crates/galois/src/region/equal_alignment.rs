//! Per-call routing on the actual alignment of the buffers passed in.

use traits::{RegionArithmetic, RegionInfo};

/// Chooses, on every call, between an `optimized` and a `basic` stack.
///
/// With `A` the optimized stack's alignment, a call with a source buffer is
/// routed to `optimized` when `dest` and `src` sit at the same offset modulo
/// `A` (so both can be brought to alignment together), and to `basic`
/// otherwise. Destination-only calls always go to `optimized`, which aligns
/// the head itself. Nothing is cached: the decision depends on the addresses.
#[derive(Debug)]
pub struct EqualAlignment<O, B> {
  optimized: O,
  basic: B,
}

impl<O, B> EqualAlignment<O, B>
where
  O: RegionArithmetic,
  B: RegionArithmetic<Value = O::Value>,
{
  /// Route between `optimized` and `basic`.
  #[inline]
  #[must_use]
  pub fn new(optimized: O, basic: B) -> Self {
    Self { optimized, basic }
  }

  /// The stack used when alignments agree.
  #[inline]
  #[must_use]
  pub fn optimized(&self) -> &O {
    &self.optimized
  }

  /// The stack used when alignments differ.
  #[inline]
  #[must_use]
  pub fn basic(&self) -> &B {
    &self.basic
  }

  /// Whether `dest` and `src` share an alignment residue.
  #[inline]
  #[must_use]
  pub fn same_residue(&self, dest: &[O::Value], src: &[O::Value]) -> bool {
    let alignment = self.optimized.alignment().max(1);
    (dest.as_ptr() as usize) % alignment == (src.as_ptr() as usize) % alignment
  }
}

impl<O, B> RegionInfo for EqualAlignment<O, B>
where
  O: RegionArithmetic,
  B: RegionArithmetic<Value = O::Value>,
{
  #[inline]
  fn alignment(&self) -> usize {
    self.optimized.alignment().max(self.basic.alignment())
  }

  #[inline]
  fn max_alignment(&self) -> usize {
    self.optimized.max_alignment().max(self.basic.max_alignment())
  }

  #[inline]
  fn granularity(&self) -> usize {
    self.optimized.granularity().max(self.basic.granularity())
  }

  #[inline]
  fn max_granularity(&self) -> usize {
    self.optimized.max_granularity().max(self.basic.max_granularity())
  }
}

macro_rules! route_binary {
  ($($name:ident),+ $(,)?) => {
    $(
      #[inline]
      fn $name(&self, dest: &mut [O::Value], src: &[O::Value]) {
        if self.same_residue(dest, src) {
          self.optimized.$name(dest, src);
        } else {
          self.basic.$name(dest, src);
        }
      }
    )+
  };
}

macro_rules! route_fused {
  ($($name:ident),+ $(,)?) => {
    $(
      #[inline]
      fn $name(&self, dest: &mut [O::Value], src: &[O::Value], constant: O::Value) {
        if self.same_residue(dest, src) {
          self.optimized.$name(dest, src, constant);
        } else {
          self.basic.$name(dest, src, constant);
        }
      }
    )+
  };
}

impl<O, B> RegionArithmetic for EqualAlignment<O, B>
where
  O: RegionArithmetic,
  B: RegionArithmetic<Value = O::Value>,
{
  type Value = O::Value;

  route_binary!(region_add, region_subtract, region_multiply, region_divide);
  route_fused!(region_multiply_add, region_multiply_subtract);

  #[inline]
  fn region_multiply_constant(&self, dest: &mut [O::Value], constant: O::Value) {
    self.optimized.region_multiply_constant(dest, constant);
  }
}

#[cfg(test)]
mod tests {
  use alloc::vec;
  use core::cell::Cell;

  use super::*;

  /// Counts calls; declares a fixed alignment.
  struct Counter {
    alignment: usize,
    calls: Cell<usize>,
  }

  impl Counter {
    fn new(alignment: usize) -> Self {
      Self {
        alignment,
        calls: Cell::new(0),
      }
    }

    fn hit(&self) {
      self.calls.set(self.calls.get() + 1);
    }
  }

  impl RegionInfo for Counter {
    fn alignment(&self) -> usize {
      self.alignment
    }
    fn max_alignment(&self) -> usize {
      self.alignment
    }
    fn granularity(&self) -> usize {
      self.alignment
    }
    fn max_granularity(&self) -> usize {
      self.alignment
    }
  }

  impl RegionArithmetic for Counter {
    type Value = u8;

    fn region_add(&self, _: &mut [u8], _: &[u8]) {
      self.hit();
    }
    fn region_subtract(&self, _: &mut [u8], _: &[u8]) {
      self.hit();
    }
    fn region_multiply(&self, _: &mut [u8], _: &[u8]) {
      self.hit();
    }
    fn region_divide(&self, _: &mut [u8], _: &[u8]) {
      self.hit();
    }
    fn region_multiply_constant(&self, _: &mut [u8], _: u8) {
      self.hit();
    }
    fn region_multiply_add(&self, _: &mut [u8], _: &[u8], _: u8) {
      self.hit();
    }
    fn region_multiply_subtract(&self, _: &mut [u8], _: &[u8], _: u8) {
      self.hit();
    }
  }

  fn router() -> EqualAlignment<Counter, Counter> {
    EqualAlignment::new(Counter::new(16), Counter::new(1))
  }

  #[test]
  fn reports_max_of_both_stacks() {
    let router = router();
    assert_eq!(router.alignment(), 16);
    assert_eq!(router.max_alignment(), 16);
    assert_eq!(router.granularity(), 16);
    assert_eq!(router.max_granularity(), 16);
  }

  #[test]
  fn equal_residues_route_to_optimized() {
    let router = router();
    let mut storage = vec![0u8; 128];
    let (dest, src) = storage.split_at_mut(64);
    // 64 is a multiple of 16, so every offset pair below agrees.
    for offset in [0usize, 3, 15] {
      let dest = &mut dest[offset..offset + 32];
      let src = &src[offset..offset + 32];
      router.region_add(dest, src);
      router.region_subtract(dest, src);
      router.region_multiply(dest, src);
      router.region_divide(dest, src);
      router.region_multiply_add(dest, src, 1);
      router.region_multiply_subtract(dest, src, 1);
    }
    assert_eq!(router.optimized().calls.get(), 18);
    assert_eq!(router.basic().calls.get(), 0);
  }

  #[test]
  fn differing_residues_route_to_basic() {
    let router = router();
    let mut storage = vec![0u8; 128];
    let (dest, src) = storage.split_at_mut(64);
    router.region_add(&mut dest[0..32], &src[1..33]);
    router.region_multiply_add(&mut dest[5..37], &src[0..32], 1);
    assert_eq!(router.optimized().calls.get(), 0);
    assert_eq!(router.basic().calls.get(), 2);
  }

  #[test]
  fn destination_only_routes_to_optimized() {
    let router = router();
    let mut storage = vec![0u8; 64];
    router.region_multiply_constant(&mut storage[1..40], 7);
    router.region_multiply_constant(&mut storage[0..40], 7);
    assert_eq!(router.optimized().calls.get(), 2);
    assert_eq!(router.basic().calls.get(), 0);
  }

  #[test]
  fn decision_is_per_call() {
    let router = router();
    let mut storage = vec![0u8; 128];
    let (dest, src) = storage.split_at_mut(64);
    router.region_add(&mut dest[0..16], &src[0..16]);
    router.region_add(&mut dest[0..16], &src[2..18]);
    router.region_add(&mut dest[4..20], &src[4..20]);
    assert_eq!(router.optimized().calls.get(), 2);
    assert_eq!(router.basic().calls.get(), 1);
  }
}
