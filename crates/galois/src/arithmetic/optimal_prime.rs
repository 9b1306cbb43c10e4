//! Arithmetic specialized for the prime 2^32 - 5.

use backend::KernelTier;
use traits::Arithmetic;

use super::{Strategy, simple_online::invert_modulo};
use crate::field::Prime2325;

const P: u32 = Prime2325::MODULUS;

/// Modular arithmetic exploiting `2^32 ≡ 5 (mod p)`.
///
/// No division instruction is ever issued on the multiply path: the 64-bit
/// product is folded twice (high word times five) and corrected by
/// conditional subtraction.
#[derive(Clone, Copy, Debug, Default)]
pub struct OptimalPrime;

impl OptimalPrime {
  /// Create the strategy.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

/// Reduce `value < 2^33 + 2^6` into `[0, p)`.
#[inline(always)]
const fn reduce(value: u64) -> u32 {
  let mut value = value;
  // Two low words plus a tiny carry can reach 2p.
  if value >= P as u64 {
    value -= P as u64;
  }
  if value >= P as u64 {
    value -= P as u64;
  }
  value as u32
}

impl Arithmetic for OptimalPrime {
  type Value = u32;
  type Field = Prime2325;

  #[inline]
  fn add(&self, a: u32, b: u32) -> u32 {
    debug_assert!(a < P && b < P);
    let sum = a.wrapping_add(b);
    // On overflow the true sum is `sum + 2^32 ≡ sum + 5`.
    let sum = sum.wrapping_add(5 * u32::from(sum < b));
    if sum >= P { sum - P } else { sum }
  }

  #[inline]
  fn subtract(&self, a: u32, b: u32) -> u32 {
    debug_assert!(a < P && b < P);
    // On borrow the wrapped result is `a - b + 2^32`; `a - b + p` is 5 less.
    a.wrapping_sub(b).wrapping_sub(5 * u32::from(a < b))
  }

  #[inline]
  fn multiply(&self, a: u32, b: u32) -> u32 {
    debug_assert!(a < P && b < P);
    let product = u64::from(a) * u64::from(b);
    let low = product & 0xFFFF_FFFF;

    let folded = (product >> 32) * 5;
    let folded_low = folded & 0xFFFF_FFFF;

    let carry = (folded >> 32) * 5;
    reduce(low + folded_low + carry)
  }

  #[inline]
  fn divide(&self, a: u32, b: u32) -> u32 {
    self.multiply(a, self.invert(b))
  }

  #[inline]
  fn invert(&self, a: u32) -> u32 {
    debug_assert!(a != 0, "zero has no inverse");
    debug_assert!(a < P, "{a} is not a field element");
    invert_modulo(u64::from(a), u64::from(P)) as u32
  }
}

impl Strategy for OptimalPrime {
  const NAME: &'static str = "optimal-prime";
  const TIER: KernelTier = KernelTier::Reference;

  fn build() -> Self {
    Self::new()
  }
}
