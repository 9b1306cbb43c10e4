//! Field descriptors.
//!
//! A field descriptor is a zero-sized type carrying compile-time constants.
//! It has no runtime instance worth speaking of and no lifecycle.

use core::fmt::Debug;

use crate::element::Element;

/// Compile-time description of a finite field.
pub trait Field: Copy + Default + Debug + Send + Sync + 'static {
  /// Storage type for one packed value.
  type Value: Element;

  /// Human-readable name (e.g. `"binary8"`).
  const NAME: &'static str;

  /// Bits per element.
  const DEGREE: u32;

  /// Number of elements in the field.
  const ORDER: u64;

  /// Largest element (`ORDER - 1`).
  const MAX_VALUE: Self::Value;

  /// Reduction polynomial without its leading term (binary fields), or the
  /// prime modulus (prime fields).
  const PRIME: u64;

  /// `true` for GF(2^n); addition is XOR.
  const CHARACTERISTIC_TWO: bool;

  /// Elements stored in one `Value` (8 for GF(2), 2 for GF(2^4), else 1).
  const ELEMENTS_PER_VALUE: u32 = <Self::Value as Element>::BITS / Self::DEGREE;
}

/// Fields of characteristic two: XOR addition, log tables are well defined.
pub trait BinaryField: Field {}

/// Binary fields of order at most 256; `order²` tables stay small.
pub trait SmallBinaryField: BinaryField<Value = u8> {}
