//! GF(2)[x] helpers shared by the binary-field strategies.
//!
//! Polynomials are bit vectors: bit `i` is the coefficient of x^i. The
//! modulus is `x^degree + prime`.

/// Degree of a nonzero polynomial.
#[inline(always)]
const fn degree_of(p: u64) -> i32 {
  63 - p.leading_zeros() as i32
}

/// Full modulus including the leading term.
#[inline(always)]
pub(crate) const fn modulus(degree: u32, prime: u64) -> u64 {
  (1u64 << degree) | prime
}

/// `a * b mod (x^degree + prime)` by shift-and-add, reducing after every
/// shift so intermediates never exceed `degree` bits.
#[inline]
#[must_use]
pub(crate) const fn multiply(a: u32, b: u32, degree: u32, prime: u64) -> u32 {
  let high = 1u64 << degree;
  let modulus = modulus(degree, prime);

  let mut a = a as u64;
  let mut b = b as u64;
  let mut product = 0u64;
  while b != 0 {
    if b & 1 != 0 {
      product ^= a;
    }
    b >>= 1;
    a <<= 1;
    if a & high != 0 {
      a ^= modulus;
    }
  }
  product as u32
}

/// Multiplicative inverse of nonzero `a` via the extended Euclidean
/// algorithm over GF(2)[x]. The modulus must be irreducible.
#[must_use]
pub(crate) fn invert(a: u32, degree: u32, prime: u64) -> u32 {
  debug_assert!(a != 0, "zero has no inverse");
  if a == 0 {
    return 0;
  }

  // Invariant: u = g1 * a and v = g2 * a (mod modulus).
  let mut u = u64::from(a);
  let mut v = modulus(degree, prime);
  let mut g1 = 1u64;
  let mut g2 = 0u64;
  while u != 1 {
    let mut shift = degree_of(u) - degree_of(v);
    if shift < 0 {
      core::mem::swap(&mut u, &mut v);
      core::mem::swap(&mut g1, &mut g2);
      shift = -shift;
    }
    u ^= v << shift;
    g1 ^= g2 << shift;
  }
  g1 as u32
}
