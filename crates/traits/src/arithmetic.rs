//! Scalar and packed arithmetic.
//!
//! [`Arithmetic`] works on single field elements. [`PackedArithmetic`] works
//! on whole storage values, which for sub-byte fields hold several elements.
//!
//! # Contract
//!
//! Inputs must lie in `[0, MAX_VALUE]`. `invert(0)` and `divide(_, 0)` are
//! caller errors: implementations `debug_assert!` and otherwise return an
//! unspecified value.

use crate::{element::Element, field::Field};

/// Per-element field arithmetic.
pub trait Arithmetic: Send + Sync {
  /// Storage type of one element.
  type Value: Element;

  /// The field this arithmetic operates in.
  type Field: Field<Value = Self::Value>;

  /// `a + b`.
  #[must_use]
  fn add(&self, a: Self::Value, b: Self::Value) -> Self::Value;

  /// `a - b`.
  #[must_use]
  fn subtract(&self, a: Self::Value, b: Self::Value) -> Self::Value;

  /// `a * b`.
  #[must_use]
  fn multiply(&self, a: Self::Value, b: Self::Value) -> Self::Value;

  /// `a / b`, for nonzero `b`.
  #[must_use]
  fn divide(&self, a: Self::Value, b: Self::Value) -> Self::Value;

  /// `1 / a`, for nonzero `a`.
  #[must_use]
  fn invert(&self, a: Self::Value) -> Self::Value;

  /// `-a`.
  #[inline]
  #[must_use]
  fn negate(&self, a: Self::Value) -> Self::Value {
    self.subtract(Self::Value::ZERO, a)
  }

  /// The full multiplication row for `constant`, indexed by the other
  /// operand, if this strategy stores one.
  ///
  /// Region loops use the row to hoist the table lookup out of the loop.
  #[inline]
  fn constant_row(&self, constant: Self::Value) -> Option<&[Self::Value]> {
    let _ = constant;
    None
  }
}

/// Arithmetic on whole storage values.
///
/// For fields with one element per value this is identical to
/// [`Arithmetic`]. For sub-byte fields, each operation applies to every
/// packed element independently.
pub trait PackedArithmetic: Arithmetic {
  /// Packed `a + b`.
  #[must_use]
  fn packed_add(&self, a: Self::Value, b: Self::Value) -> Self::Value;

  /// Packed `a - b`.
  #[must_use]
  fn packed_subtract(&self, a: Self::Value, b: Self::Value) -> Self::Value;

  /// Packed `a * b`.
  #[must_use]
  fn packed_multiply(&self, a: Self::Value, b: Self::Value) -> Self::Value;

  /// Packed `a / b`. Every packed element of `b` must be nonzero.
  #[must_use]
  fn packed_divide(&self, a: Self::Value, b: Self::Value) -> Self::Value;

  /// Packed `1 / a`. Every packed element of `a` must be nonzero.
  #[must_use]
  fn packed_invert(&self, a: Self::Value) -> Self::Value;

  /// Packed `a * constant`, where `constant` holds the same element in
  /// every packed position.
  #[must_use]
  fn packed_multiply_constant(&self, a: Self::Value, constant: Self::Value) -> Self::Value;

  /// The packed counterpart of [`Arithmetic::constant_row`]: a row indexed
  /// by whole storage values, if one is stored.
  #[inline]
  fn packed_constant_row(&self, constant: Self::Value) -> Option<&[Self::Value]> {
    let _ = constant;
    None
  }
}
