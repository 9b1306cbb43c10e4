//! Direct computation, no tables.

use core::marker::PhantomData;

use backend::KernelTier;
use traits::{Arithmetic, Element, Field};

use super::Strategy;
use crate::polynomial;

/// Computes every operation from scratch.
///
/// Binary fields use carry-less shift-and-add multiplication and polynomial
/// extended Euclid; the prime field uses 64-bit products and integer
/// extended Euclid. This is the reference the table strategies are built
/// from and checked against.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleOnline<F>(PhantomData<F>);

impl<F: Field> SimpleOnline<F> {
  /// Create the strategy. There is nothing to precompute.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self(PhantomData)
  }
}

impl<F: Field> Arithmetic for SimpleOnline<F> {
  type Value = F::Value;
  type Field = F;

  #[inline]
  fn add(&self, a: F::Value, b: F::Value) -> F::Value {
    debug_assert!(a <= F::MAX_VALUE && b <= F::MAX_VALUE);
    if F::CHARACTERISTIC_TWO {
      F::Value::from_u32(a.to_u32() ^ b.to_u32())
    } else {
      let sum = (u64::from(a.to_u32()) + u64::from(b.to_u32())) % F::PRIME;
      F::Value::from_u32(sum as u32)
    }
  }

  #[inline]
  fn subtract(&self, a: F::Value, b: F::Value) -> F::Value {
    debug_assert!(a <= F::MAX_VALUE && b <= F::MAX_VALUE);
    if F::CHARACTERISTIC_TWO {
      F::Value::from_u32(a.to_u32() ^ b.to_u32())
    } else {
      let difference = (u64::from(a.to_u32()) + F::PRIME - u64::from(b.to_u32())) % F::PRIME;
      F::Value::from_u32(difference as u32)
    }
  }

  #[inline]
  fn multiply(&self, a: F::Value, b: F::Value) -> F::Value {
    debug_assert!(a <= F::MAX_VALUE && b <= F::MAX_VALUE);
    if F::CHARACTERISTIC_TWO {
      F::Value::from_u32(polynomial::multiply(a.to_u32(), b.to_u32(), F::DEGREE, F::PRIME))
    } else {
      let product = u64::from(a.to_u32()) * u64::from(b.to_u32()) % F::PRIME;
      F::Value::from_u32(product as u32)
    }
  }

  #[inline]
  fn divide(&self, a: F::Value, b: F::Value) -> F::Value {
    self.multiply(a, self.invert(b))
  }

  fn invert(&self, a: F::Value) -> F::Value {
    debug_assert!(a != F::Value::ZERO, "zero has no inverse");
    debug_assert!(a <= F::MAX_VALUE);
    if F::CHARACTERISTIC_TWO {
      F::Value::from_u32(polynomial::invert(a.to_u32(), F::DEGREE, F::PRIME))
    } else {
      F::Value::from_u32(invert_modulo(u64::from(a.to_u32()), F::PRIME) as u32)
    }
  }
}

impl<F: Field> Strategy for SimpleOnline<F> {
  const NAME: &'static str = "simple-online";
  const TIER: KernelTier = KernelTier::Reference;

  #[inline]
  fn build() -> Self {
    Self::new()
  }
}

/// Inverse of `a` modulo the prime `p` by the extended Euclidean algorithm.
///
/// Bezout coefficients stay within `(-p, p)`, so `i64` never overflows for
/// `p < 2^32`.
pub(crate) fn invert_modulo(a: u64, p: u64) -> u64 {
  let (mut r0, mut r1) = (p as i64, a as i64);
  let (mut x0, mut x1) = (0i64, 1i64);
  while r1 != 0 {
    let q = r0 / r1;
    (r0, r1) = (r1, r0 - q * r1);
    (x0, x1) = (x1, x0 - q * x1);
  }
  debug_assert_eq!(r0, 1, "{a} is not invertible modulo {p}");
  if x0 < 0 {
    x0 += p as i64;
  }
  x0 as u64
}
