//! Discrete logarithm tables.

use alloc::{boxed::Box, vec};
use core::marker::PhantomData;

use backend::KernelTier;
use traits::{Arithmetic, BinaryField, Element};

use super::{SimpleOnline, Strategy};

/// Multiplication and division through `log`/`antilog` tables.
///
/// `antilog[i] = g^i` for the generator `g = x` (or `1` in GF(2)), over the
/// `order - 1` nonzero elements. `log` is its inverse; `log[0]` is an unused
/// sentinel, so zero operands are handled before any lookup.
#[derive(Clone, Debug)]
pub struct LogTable<F: BinaryField> {
  log: Box<[F::Value]>,
  antilog: Box<[F::Value]>,
  _field: PhantomData<F>,
}

impl<F: BinaryField> LogTable<F> {
  /// Number of nonzero elements; the period of the generator.
  const PERIOD: usize = (F::ORDER - 1) as usize;

  /// Build both tables from [`SimpleOnline`].
  #[must_use]
  pub fn new() -> Self {
    let simple = SimpleOnline::<F>::new();
    let generator = if F::ORDER == 2 { F::Value::ONE } else { F::Value::from_u32(2) };

    let mut log = vec![F::Value::ZERO; F::ORDER as usize];
    let mut antilog = vec![F::Value::ZERO; Self::PERIOD];

    let mut power = F::Value::ONE;
    for (exponent, slot) in antilog.iter_mut().enumerate() {
      *slot = power;
      log[power.to_usize()] = F::Value::from_u32(exponent as u32);
      power = simple.multiply(power, generator);
    }
    debug_assert_eq!(power, F::Value::ONE, "generator is not primitive");

    Self {
      log: log.into_boxed_slice(),
      antilog: antilog.into_boxed_slice(),
      _field: PhantomData,
    }
  }

  #[inline(always)]
  fn log(&self, a: F::Value) -> usize {
    self.log[a.to_usize()].to_usize()
  }
}

impl<F: BinaryField> Default for LogTable<F> {
  fn default() -> Self {
    Self::new()
  }
}

impl<F: BinaryField> Arithmetic for LogTable<F> {
  type Value = F::Value;
  type Field = F;

  #[inline]
  fn add(&self, a: F::Value, b: F::Value) -> F::Value {
    F::Value::from_u32(a.to_u32() ^ b.to_u32())
  }

  #[inline]
  fn subtract(&self, a: F::Value, b: F::Value) -> F::Value {
    F::Value::from_u32(a.to_u32() ^ b.to_u32())
  }

  #[inline]
  fn multiply(&self, a: F::Value, b: F::Value) -> F::Value {
    if a == F::Value::ZERO || b == F::Value::ZERO {
      return F::Value::ZERO;
    }
    self.antilog[(self.log(a) + self.log(b)) % Self::PERIOD]
  }

  #[inline]
  fn divide(&self, a: F::Value, b: F::Value) -> F::Value {
    debug_assert!(b != F::Value::ZERO, "division by zero");
    if a == F::Value::ZERO {
      return F::Value::ZERO;
    }
    self.antilog[(self.log(a) + Self::PERIOD - self.log(b)) % Self::PERIOD]
  }

  #[inline]
  fn invert(&self, a: F::Value) -> F::Value {
    debug_assert!(a != F::Value::ZERO, "zero has no inverse");
    self.antilog[(Self::PERIOD - self.log(a)) % Self::PERIOD]
  }
}

impl<F: BinaryField> Strategy for LogTable<F> {
  const NAME: &'static str = "log-table";
  const TIER: KernelTier = KernelTier::Table;

  fn build() -> Self {
    Self::new()
  }
}
