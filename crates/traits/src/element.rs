//! Storage types for field elements.

use core::{fmt::Debug, hash::Hash};

/// An unsigned integer used to store field elements.
///
/// Implemented for `u8`, `u16` and `u32`. Elements are plain values: no
/// identity, no validation. Range checks belong to the field.
pub trait Element: Copy + Eq + Ord + Hash + Default + Debug + Send + Sync + 'static {
  /// Storage width in bits.
  const BITS: u32;

  /// Additive identity.
  const ZERO: Self;

  /// Multiplicative identity.
  const ONE: Self;

  /// Widen to `u32`.
  fn to_u32(self) -> u32;

  /// Narrow from `u32`, discarding high bits.
  fn from_u32(value: u32) -> Self;

  /// Reinterpret a slice of elements as bytes, when the element *is* a byte.
  ///
  /// Byte-shuffle kernels operate on `u8` storage only; every other width
  /// returns `None`.
  fn as_bytes_mut(values: &mut [Self]) -> Option<&mut [u8]>;

  /// Widen to `usize` (table index).
  #[inline]
  fn to_usize(self) -> usize {
    self.to_u32() as usize
  }
}

impl Element for u8 {
  const BITS: u32 = 8;
  const ZERO: Self = 0;
  const ONE: Self = 1;

  #[inline(always)]
  fn to_u32(self) -> u32 {
    u32::from(self)
  }

  #[inline(always)]
  fn from_u32(value: u32) -> Self {
    value as u8
  }

  #[inline(always)]
  fn as_bytes_mut(values: &mut [Self]) -> Option<&mut [u8]> {
    Some(values)
  }
}

impl Element for u16 {
  const BITS: u32 = 16;
  const ZERO: Self = 0;
  const ONE: Self = 1;

  #[inline(always)]
  fn to_u32(self) -> u32 {
    u32::from(self)
  }

  #[inline(always)]
  fn from_u32(value: u32) -> Self {
    value as u16
  }

  #[inline(always)]
  fn as_bytes_mut(_values: &mut [Self]) -> Option<&mut [u8]> {
    None
  }
}

impl Element for u32 {
  const BITS: u32 = 32;
  const ZERO: Self = 0;
  const ONE: Self = 1;

  #[inline(always)]
  fn to_u32(self) -> u32 {
    self
  }

  #[inline(always)]
  fn from_u32(value: u32) -> Self {
    value
  }

  #[inline(always)]
  fn as_bytes_mut(_values: &mut [Self]) -> Option<&mut [u8]> {
    None
  }
}
