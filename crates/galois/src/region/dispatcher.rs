//! Capability dispatch for region multiply-by-constant.

use backend::{KernelTier, Selected};
use traits::{Element, RegionArithmetic, RegionInfo};

use crate::simd::{self, MultiplyConstantFn, NibbleTables};

/// A resolved multiply-by-constant kernel together with the tables it reads.
#[derive(Debug)]
pub struct MultiplyConstantKernel {
  selected: Selected<MultiplyConstantFn>,
  tables: NibbleTables,
  threshold: usize,
}

impl MultiplyConstantKernel {
  /// Bundle a selected kernel with its tables.
  ///
  /// Aligned bodies shorter than `threshold` bytes stay on the base path.
  #[must_use]
  pub fn new(selected: Selected<MultiplyConstantFn>, tables: NibbleTables, threshold: usize) -> Self {
    Self {
      selected,
      tables,
      threshold,
    }
  }

  /// Kernel name, e.g. `"x86_64/ssse3"`.
  #[inline]
  #[must_use]
  pub fn name(&self) -> &'static str {
    self.selected.name
  }

  /// Kernel tier.
  #[inline]
  #[must_use]
  pub fn tier(&self) -> KernelTier {
    self.selected.tier
  }

  /// Smallest aligned body handed to the kernel.
  #[inline]
  #[must_use]
  pub fn threshold(&self) -> usize {
    self.threshold
  }

  #[inline]
  fn run(&self, constant: u8, bytes: &mut [u8]) {
    (self.selected.func)(self.tables.get(constant), bytes);
  }
}

/// Routes region multiply-by-constant to a vector kernel when one was
/// resolved; everything else goes to `base`.
///
/// The routing target is fixed at construction. The reported alignment and
/// granularity are the maximum of `base` and the kernel, so a caller honoring
/// them satisfies both paths.
#[derive(Debug)]
pub struct RegionDispatcher<B> {
  base: B,
  kernel: Option<MultiplyConstantKernel>,
}

impl<B: RegionArithmetic> RegionDispatcher<B> {
  /// Wrap `base`, with an optional accelerated kernel.
  #[inline]
  #[must_use]
  pub fn new(base: B, kernel: Option<MultiplyConstantKernel>) -> Self {
    Self { base, kernel }
  }

  /// `true` iff an accelerated kernel was resolved.
  #[inline]
  #[must_use]
  pub fn enabled(&self) -> bool {
    self.kernel.is_some()
  }

  /// The resolved kernel, if any.
  #[inline]
  #[must_use]
  pub fn kernel(&self) -> Option<&MultiplyConstantKernel> {
    self.kernel.as_ref()
  }

  /// The fallback implementation.
  #[inline]
  #[must_use]
  pub fn base(&self) -> &B {
    &self.base
  }

  #[inline]
  fn widest(&self, base: usize, kernel: usize) -> usize {
    if self.enabled() { base.max(kernel) } else { base }
  }
}

impl<B: RegionArithmetic> RegionInfo for RegionDispatcher<B> {
  #[inline]
  fn alignment(&self) -> usize {
    self.widest(self.base.alignment(), simd::ALIGNMENT)
  }

  #[inline]
  fn max_alignment(&self) -> usize {
    self.widest(self.base.max_alignment(), simd::ALIGNMENT)
  }

  #[inline]
  fn granularity(&self) -> usize {
    self.widest(self.base.granularity(), simd::GRANULARITY)
  }

  #[inline]
  fn max_granularity(&self) -> usize {
    self.widest(self.base.max_granularity(), simd::GRANULARITY)
  }
}

impl<B: RegionArithmetic> RegionArithmetic for RegionDispatcher<B> {
  type Value = B::Value;

  #[inline]
  fn region_add(&self, dest: &mut [B::Value], src: &[B::Value]) {
    self.base.region_add(dest, src);
  }

  #[inline]
  fn region_subtract(&self, dest: &mut [B::Value], src: &[B::Value]) {
    self.base.region_subtract(dest, src);
  }

  #[inline]
  fn region_multiply(&self, dest: &mut [B::Value], src: &[B::Value]) {
    self.base.region_multiply(dest, src);
  }

  #[inline]
  fn region_divide(&self, dest: &mut [B::Value], src: &[B::Value]) {
    self.base.region_divide(dest, src);
  }

  fn region_multiply_constant(&self, dest: &mut [B::Value], constant: B::Value) {
    debug_assert!(!dest.is_empty(), "empty destination region");
    let Some(kernel) = &self.kernel else {
      self.base.region_multiply_constant(dest, constant);
      return;
    };
    if B::Value::BITS != 8 {
      self.base.region_multiply_constant(dest, constant);
      return;
    }

    // Unaligned head, aligned whole-granule body, remainder tail.
    let len = dest.len();
    let head = dest.as_ptr().align_offset(simd::ALIGNMENT).min(len);
    let body = (len - head) / simd::GRANULARITY * simd::GRANULARITY;
    if body == 0 || body < kernel.threshold {
      self.base.region_multiply_constant(dest, constant);
      return;
    }

    let (head, rest) = dest.split_at_mut(head);
    let (body, tail) = rest.split_at_mut(body);
    if !head.is_empty() {
      self.base.region_multiply_constant(head, constant);
    }
    match B::Value::as_bytes_mut(body) {
      Some(bytes) => kernel.run(constant.to_u32() as u8, bytes),
      None => self.base.region_multiply_constant(body, constant),
    }
    if !tail.is_empty() {
      self.base.region_multiply_constant(tail, constant);
    }
  }

  #[inline]
  fn region_multiply_add(&self, dest: &mut [B::Value], src: &[B::Value], constant: B::Value) {
    self.base.region_multiply_add(dest, src, constant);
  }

  #[inline]
  fn region_multiply_subtract(&self, dest: &mut [B::Value], src: &[B::Value], constant: B::Value) {
    self.base.region_multiply_subtract(dest, src, constant);
  }
}

#[cfg(test)]
mod tests {
  use alloc::{sync::Arc, vec};
  use core::cell::Cell;

  use super::*;
  use crate::{
    arithmetic::SimpleOnline,
    field::Binary8,
    packed::Packed,
    region::RegionLoop,
  };

  /// Records which operations reached it and how many elements each saw.
  #[derive(Default)]
  struct Recorder {
    multiply_constant: Cell<usize>,
    elements: Cell<usize>,
    other: Cell<usize>,
  }

  impl RegionInfo for Recorder {
    fn alignment(&self) -> usize {
      1
    }
    fn max_alignment(&self) -> usize {
      1
    }
    fn granularity(&self) -> usize {
      1
    }
    fn max_granularity(&self) -> usize {
      1
    }
  }

  impl RegionArithmetic for Recorder {
    type Value = u8;

    fn region_add(&self, _: &mut [u8], _: &[u8]) {
      self.other.set(self.other.get() + 1);
    }
    fn region_subtract(&self, _: &mut [u8], _: &[u8]) {
      self.other.set(self.other.get() + 1);
    }
    fn region_multiply(&self, _: &mut [u8], _: &[u8]) {
      self.other.set(self.other.get() + 1);
    }
    fn region_divide(&self, _: &mut [u8], _: &[u8]) {
      self.other.set(self.other.get() + 1);
    }
    fn region_multiply_constant(&self, dest: &mut [u8], _: u8) {
      self.multiply_constant.set(self.multiply_constant.get() + 1);
      self.elements.set(self.elements.get() + dest.len());
    }
    fn region_multiply_add(&self, _: &mut [u8], _: &[u8], _: u8) {
      self.other.set(self.other.get() + 1);
    }
    fn region_multiply_subtract(&self, _: &mut [u8], _: &[u8], _: u8) {
      self.other.set(self.other.get() + 1);
    }
  }

  fn portable_kernel(threshold: usize) -> MultiplyConstantKernel {
    let packed = Packed::new(SimpleOnline::<Binary8>::new());
    let tables = NibbleTables::build(&packed).unwrap();
    let selected = Selected::new("portable/nibble", KernelTier::Simd, simd::portable::multiply_constant as MultiplyConstantFn);
    MultiplyConstantKernel::new(selected, tables, threshold)
  }

  /// A 16-aligned window of `len` bytes starting `offset` bytes in.
  fn aligned_window(storage: &mut [u8], offset: usize, len: usize) -> &mut [u8] {
    let start = storage.as_ptr().align_offset(16);
    &mut storage[start + offset..start + offset + len]
  }

  #[test]
  fn disabled_reports_base_contract() {
    let dispatcher = RegionDispatcher::new(Recorder::default(), None);
    assert!(!dispatcher.enabled());
    assert_eq!(dispatcher.alignment(), 1);
    assert_eq!(dispatcher.max_granularity(), 1);

    let mut data = [1u8; 64];
    dispatcher.region_multiply_constant(&mut data, 3);
    assert_eq!(dispatcher.base().multiply_constant.get(), 1);
    assert_eq!(dispatcher.base().elements.get(), 64);
  }

  #[test]
  fn enabled_reports_max_contract() {
    let dispatcher = RegionDispatcher::new(Recorder::default(), Some(portable_kernel(0)));
    assert!(dispatcher.enabled());
    assert_eq!(dispatcher.alignment(), 16);
    assert_eq!(dispatcher.max_alignment(), 16);
    assert_eq!(dispatcher.granularity(), 16);
    assert_eq!(dispatcher.max_granularity(), 16);
  }

  #[test]
  fn kernel_takes_aligned_body_only() {
    let dispatcher = RegionDispatcher::new(Recorder::default(), Some(portable_kernel(0)));
    let mut storage = vec![0u8; 128];
    // 3 head bytes, 48 body bytes, 5 tail bytes.
    let window = aligned_window(&mut storage, 13, 56);
    dispatcher.region_multiply_constant(window, 2);
    assert_eq!(dispatcher.base().multiply_constant.get(), 2);
    assert_eq!(dispatcher.base().elements.get(), 8);
  }

  #[test]
  fn short_bodies_stay_on_base() {
    let dispatcher = RegionDispatcher::new(Recorder::default(), Some(portable_kernel(64)));
    let mut storage = vec![0u8; 128];
    let window = aligned_window(&mut storage, 0, 48);
    dispatcher.region_multiply_constant(window, 2);
    assert_eq!(dispatcher.base().multiply_constant.get(), 1);
    assert_eq!(dispatcher.base().elements.get(), 48);
  }

  #[test]
  fn other_operations_fall_through() {
    let dispatcher = RegionDispatcher::new(Recorder::default(), Some(portable_kernel(0)));
    let mut dest = [0u8; 32];
    let src = [1u8; 32];
    dispatcher.region_add(&mut dest, &src);
    dispatcher.region_subtract(&mut dest, &src);
    dispatcher.region_multiply(&mut dest, &src);
    dispatcher.region_divide(&mut dest, &src);
    dispatcher.region_multiply_add(&mut dest, &src, 3);
    dispatcher.region_multiply_subtract(&mut dest, &src, 3);
    assert_eq!(dispatcher.base().other.get(), 6);
    assert_eq!(dispatcher.base().multiply_constant.get(), 0);
  }

  #[test]
  fn split_result_matches_loop() {
    let packed = Arc::new(Packed::new(SimpleOnline::<Binary8>::new()));
    let dispatcher = RegionDispatcher::new(RegionLoop::new(Arc::clone(&packed)), Some(portable_kernel(0)));
    let reference = RegionLoop::new(packed);

    let mut storage = vec![0u8; 256];
    for offset in 0..16 {
      for len in [1usize, 15, 16, 17, 33, 100, 200] {
        let window = aligned_window(&mut storage, offset, len);
        for (i, byte) in window.iter_mut().enumerate() {
          *byte = (i * 37 + offset) as u8;
        }
        let mut expected = window.to_vec();
        reference.region_multiply_constant(&mut expected, 0xA7);
        dispatcher.region_multiply_constant(window, 0xA7);
        assert_eq!(window, &expected[..], "offset={offset} len={len}");
      }
    }
  }
}
