//! Region (buffer) arithmetic.
//!
//! A region operation applies an arithmetic operation element-wise across
//! a caller-owned buffer, in index order, writing into `dest` in place.
//! Region operations never allocate.
//!
//! # Contract
//!
//! - `dest` is non-empty.
//! - `src`, when present, has the same length as `dest`.
//! - `constant`, when present, is a packed constant.
//!
//! Implementations `debug_assert!` these preconditions.

use crate::element::Element;

/// Memory contract declared by a region implementation.
///
/// Alignments are in bytes, granularities in storage values. A layer that
/// composes several implementations reports the maximum of each.
pub trait RegionInfo {
  /// Minimum alignment the implementation processes efficiently.
  fn alignment(&self) -> usize;

  /// Largest alignment the implementation can take advantage of.
  fn max_alignment(&self) -> usize;

  /// Number of values processed as one indivisible unit.
  fn granularity(&self) -> usize;

  /// Largest unit the implementation can take advantage of.
  fn max_granularity(&self) -> usize;
}

/// Element-wise arithmetic over buffers.
pub trait RegionArithmetic: RegionInfo {
  /// Storage type of one packed value.
  type Value: Element;

  /// `dest[i] = dest[i] + src[i]`
  fn region_add(&self, dest: &mut [Self::Value], src: &[Self::Value]);

  /// `dest[i] = dest[i] - src[i]`
  fn region_subtract(&self, dest: &mut [Self::Value], src: &[Self::Value]);

  /// `dest[i] = dest[i] * src[i]`
  fn region_multiply(&self, dest: &mut [Self::Value], src: &[Self::Value]);

  /// `dest[i] = dest[i] / src[i]`
  fn region_divide(&self, dest: &mut [Self::Value], src: &[Self::Value]);

  /// `dest[i] = dest[i] * constant`
  fn region_multiply_constant(&self, dest: &mut [Self::Value], constant: Self::Value);

  /// `dest[i] = dest[i] + src[i] * constant`
  fn region_multiply_add(&self, dest: &mut [Self::Value], src: &[Self::Value], constant: Self::Value);

  /// `dest[i] = dest[i] - src[i] * constant`
  fn region_multiply_subtract(&self, dest: &mut [Self::Value], src: &[Self::Value], constant: Self::Value);
}
