//! Error types for checked field operations.
//!
//! Unchecked operations treat bad input as a caller bug. The checked
//! variants return one of these instead.

use core::fmt;

/// A caller-contract violation detected by a checked operation.
///
/// # Examples
///
/// ```
/// use traits::ArithmeticError;
///
/// fn checked_reciprocal(a: u8) -> Result<u8, ArithmeticError> {
///   if a == 0 {
///     return Err(ArithmeticError::ZeroDivisor);
///   }
///   Ok(a)
/// }
///
/// assert_eq!(checked_reciprocal(0), Err(ArithmeticError::ZeroDivisor));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ArithmeticError {
  /// Division by, or inversion of, the additive identity.
  ZeroDivisor,
  /// An element outside `[0, MAX_VALUE]`.
  OutOfRange,
  /// A region operation on an empty destination.
  EmptyRegion,
  /// Source and destination buffers differ in length.
  LengthMismatch,
  /// A constant whose packed elements are not all equal.
  UnpackedConstant,
}

impl ArithmeticError {
  /// Short description, as used by `Display`.
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::ZeroDivisor => "division by zero",
      Self::OutOfRange => "element out of field range",
      Self::EmptyRegion => "empty destination region",
      Self::LengthMismatch => "source and destination lengths differ",
      Self::UnpackedConstant => "constant is not a packed constant",
    }
  }
}

impl fmt::Display for ArithmeticError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl core::error::Error for ArithmeticError {}
