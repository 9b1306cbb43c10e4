//! The five supported fields.
//!
//! | Type | Field | Storage | Elements/value | Modulus |
//! |------|-------|---------|----------------|---------|
//! | [`Binary`] | GF(2) | `u8` | 8 | x + 1 |
//! | [`Binary4`] | GF(2^4) | `u8` | 2 | x^4 + x + 1 |
//! | [`Binary8`] | GF(2^8) | `u8` | 1 | x^8 + x^4 + x^3 + x^2 + 1 |
//! | [`Binary16`] | GF(2^16) | `u16` | 1 | x^16 + x^12 + x^3 + x + 1 |
//! | [`Prime2325`] | GF(2^32 - 5) | `u32` | 1 | 4294967291 |
//!
//! Binary moduli are stored without their leading term, so `Binary8::PRIME`
//! is `0x1D` for `0x11D`.

use traits::{BinaryField, Field, SmallBinaryField};

/// GF(2). Eight elements are packed into each byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Binary;

impl Field for Binary {
  type Value = u8;

  const NAME: &'static str = "binary";
  const DEGREE: u32 = 1;
  const ORDER: u64 = 2;
  const MAX_VALUE: u8 = 1;
  const PRIME: u64 = 0x1;
  const CHARACTERISTIC_TWO: bool = true;
}

impl BinaryField for Binary {}
impl SmallBinaryField for Binary {}

/// GF(2^4). Two elements are packed into each byte, low nibble first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Binary4;

impl Field for Binary4 {
  type Value = u8;

  const NAME: &'static str = "binary4";
  const DEGREE: u32 = 4;
  const ORDER: u64 = 16;
  const MAX_VALUE: u8 = 15;
  const PRIME: u64 = 0x3;
  const CHARACTERISTIC_TWO: bool = true;
}

impl BinaryField for Binary4 {}
impl SmallBinaryField for Binary4 {}

/// GF(2^8).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Binary8;

impl Field for Binary8 {
  type Value = u8;

  const NAME: &'static str = "binary8";
  const DEGREE: u32 = 8;
  const ORDER: u64 = 256;
  const MAX_VALUE: u8 = 255;
  const PRIME: u64 = 0x1D;
  const CHARACTERISTIC_TWO: bool = true;
}

impl BinaryField for Binary8 {}
impl SmallBinaryField for Binary8 {}

/// GF(2^16).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Binary16;

impl Field for Binary16 {
  type Value = u16;

  const NAME: &'static str = "binary16";
  const DEGREE: u32 = 16;
  const ORDER: u64 = 65536;
  const MAX_VALUE: u16 = 65535;
  const PRIME: u64 = 0x100B;
  const CHARACTERISTIC_TWO: bool = true;
}

impl BinaryField for Binary16 {}

/// The prime field of order 2^32 - 5.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Prime2325;

impl Prime2325 {
  /// The modulus, `2^32 - 5`.
  pub const MODULUS: u32 = 4_294_967_291;
}

impl Field for Prime2325 {
  type Value = u32;

  const NAME: &'static str = "prime2325";
  const DEGREE: u32 = 32;
  const ORDER: u64 = Self::MODULUS as u64;
  const MAX_VALUE: u32 = Self::MODULUS - 1;
  const PRIME: u64 = Self::MODULUS as u64;
  const CHARACTERISTIC_TWO: bool = false;
}
