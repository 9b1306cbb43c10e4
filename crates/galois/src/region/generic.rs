//! The generic element-wise loop.

use alloc::sync::Arc;

use traits::{Element, PackedArithmetic, RegionArithmetic, RegionInfo};

use super::debug_check_lengths;
use crate::packed::is_packed_constant;

/// Applies packed arithmetic element by element, in index order.
///
/// Multiply-by-constant (and the fused forms) hoist the constant's row out
/// of the loop when the arithmetic stores one. Nothing here allocates.
#[derive(Debug)]
pub struct RegionLoop<P> {
  arithmetic: Arc<P>,
}

impl<P> Clone for RegionLoop<P> {
  fn clone(&self) -> Self {
    Self {
      arithmetic: Arc::clone(&self.arithmetic),
    }
  }
}

impl<P: PackedArithmetic> RegionLoop<P> {
  /// Loop over `arithmetic`, which may be shared with other stacks.
  #[inline]
  #[must_use]
  pub fn new(arithmetic: Arc<P>) -> Self {
    Self { arithmetic }
  }

  /// The packed arithmetic this loop applies.
  #[inline]
  #[must_use]
  pub fn arithmetic(&self) -> &P {
    &self.arithmetic
  }

  #[inline(always)]
  fn zip_with(&self, dest: &mut [P::Value], src: &[P::Value], op: impl Fn(&P, P::Value, P::Value) -> P::Value) {
    debug_check_lengths(dest, src);
    let arithmetic = &*self.arithmetic;
    for (d, &s) in dest.iter_mut().zip(src) {
      *d = op(arithmetic, *d, s);
    }
  }

  #[inline(always)]
  fn debug_check_constant(constant: P::Value) {
    debug_assert!(
      is_packed_constant::<P::Field>(constant),
      "{constant:?} is not a packed constant"
    );
  }
}

impl<P: PackedArithmetic> RegionInfo for RegionLoop<P> {
  #[inline]
  fn alignment(&self) -> usize {
    core::mem::size_of::<P::Value>()
  }

  #[inline]
  fn max_alignment(&self) -> usize {
    core::mem::size_of::<P::Value>()
  }

  #[inline]
  fn granularity(&self) -> usize {
    1
  }

  #[inline]
  fn max_granularity(&self) -> usize {
    1
  }
}

impl<P: PackedArithmetic> RegionArithmetic for RegionLoop<P> {
  type Value = P::Value;

  fn region_add(&self, dest: &mut [P::Value], src: &[P::Value]) {
    self.zip_with(dest, src, P::packed_add);
  }

  fn region_subtract(&self, dest: &mut [P::Value], src: &[P::Value]) {
    self.zip_with(dest, src, P::packed_subtract);
  }

  fn region_multiply(&self, dest: &mut [P::Value], src: &[P::Value]) {
    self.zip_with(dest, src, P::packed_multiply);
  }

  fn region_divide(&self, dest: &mut [P::Value], src: &[P::Value]) {
    self.zip_with(dest, src, P::packed_divide);
  }

  fn region_multiply_constant(&self, dest: &mut [P::Value], constant: P::Value) {
    debug_assert!(!dest.is_empty(), "empty destination region");
    Self::debug_check_constant(constant);

    let arithmetic = &*self.arithmetic;
    match arithmetic.packed_constant_row(constant) {
      Some(row) => {
        for d in dest.iter_mut() {
          *d = row[d.to_usize()];
        }
      }
      None => {
        for d in dest.iter_mut() {
          *d = arithmetic.packed_multiply_constant(*d, constant);
        }
      }
    }
  }

  fn region_multiply_add(&self, dest: &mut [P::Value], src: &[P::Value], constant: P::Value) {
    Self::debug_check_constant(constant);
    let arithmetic = &*self.arithmetic;
    match arithmetic.packed_constant_row(constant) {
      Some(row) => self.zip_with(dest, src, |a, d, s| a.packed_add(d, row[s.to_usize()])),
      None => self.zip_with(dest, src, |a, d, s| a.packed_add(d, a.packed_multiply_constant(s, constant))),
    }
  }

  fn region_multiply_subtract(&self, dest: &mut [P::Value], src: &[P::Value], constant: P::Value) {
    Self::debug_check_constant(constant);
    let arithmetic = &*self.arithmetic;
    match arithmetic.packed_constant_row(constant) {
      Some(row) => self.zip_with(dest, src, |a, d, s| a.packed_subtract(d, row[s.to_usize()])),
      None => self.zip_with(dest, src, |a, d, s| {
        a.packed_subtract(d, a.packed_multiply_constant(s, constant))
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use traits::Arithmetic;

  use super::*;
  use crate::{
    arithmetic::{FullTable, OptimalPrime, SimpleOnline},
    field::{Binary4, Binary8},
    packed::Packed,
  };

  fn binary8_loop() -> RegionLoop<Packed<SimpleOnline<Binary8>>> {
    RegionLoop::new(Arc::new(Packed::new(SimpleOnline::new())))
  }

  #[test]
  fn info_is_natural_alignment() {
    let region = binary8_loop();
    assert_eq!((region.alignment(), region.max_alignment()), (1, 1));
    assert_eq!((region.granularity(), region.max_granularity()), (1, 1));

    let prime = RegionLoop::new(Arc::new(Packed::new(OptimalPrime::new())));
    assert_eq!((prime.alignment(), prime.max_alignment()), (4, 4));
  }

  #[test]
  fn region_ops_match_scalar() {
    let region = binary8_loop();
    let scalar = SimpleOnline::<Binary8>::new();
    let src: [u8; 6] = [1, 2, 3, 0x80, 0xFE, 0x53];
    let init: [u8; 6] = [7, 7, 0, 2, 0x11, 0xCA];

    let mut dest = init;
    region.region_multiply(&mut dest, &src);
    for i in 0..6 {
      assert_eq!(dest[i], scalar.multiply(init[i], src[i]));
    }

    region.region_divide(&mut dest, &src);
    assert_eq!(dest, init);

    region.region_add(&mut dest, &src);
    region.region_subtract(&mut dest, &src);
    assert_eq!(dest, init);
  }

  #[test]
  fn row_path_equals_computed_path() {
    let table = RegionLoop::new(Arc::new(Packed::new(FullTable::<Binary8>::new())));
    let simple = binary8_loop();
    let mut a: [u8; 256] = core::array::from_fn(|i| i as u8);
    let mut b = a;
    table.region_multiply_constant(&mut a, 0x1D);
    simple.region_multiply_constant(&mut b, 0x1D);
    assert_eq!(a, b);
  }

  #[test]
  fn fused_equals_two_step() {
    let region = RegionLoop::new(Arc::new(Packed::new(SimpleOnline::<Binary4>::new())));
    let src: [u8; 5] = [0x12, 0x34, 0x56, 0x78, 0x9A];
    let init: [u8; 5] = [0xFF, 0x00, 0xA5, 0x5A, 0x3C];
    let constant = 0xBB;

    let mut fused = init;
    region.region_multiply_add(&mut fused, &src, constant);

    let mut product = src;
    region.region_multiply_constant(&mut product, constant);
    let mut unfused = init;
    region.region_add(&mut unfused, &product);
    assert_eq!(fused, unfused);

    region.region_multiply_subtract(&mut fused, &src, constant);
    assert_eq!(fused, init);
  }
}
