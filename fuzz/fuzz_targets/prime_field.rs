//! Differential fuzzing of the folding prime-field arithmetic against
//! direct 64-bit computation.

#![no_main]

use galois::{Arithmetic, arithmetic::OptimalPrime, field::Prime2325};
use libfuzzer_sys::fuzz_target;

const P: u64 = Prime2325::MODULUS as u64;

fuzz_target!(|input: (u32, u32)| {
  let a = (u64::from(input.0) % P) as u32;
  let b = (u64::from(input.1) % P) as u32;
  let gf = OptimalPrime::new();

  assert_eq!(u64::from(gf.add(a, b)), (u64::from(a) + u64::from(b)) % P, "{a} + {b}");
  assert_eq!(u64::from(gf.subtract(a, b)), (u64::from(a) + P - u64::from(b)) % P, "{a} - {b}");
  assert_eq!(u64::from(gf.multiply(a, b)), u64::from(a) * u64::from(b) % P, "{a} * {b}");
  if b != 0 {
    assert_eq!(gf.multiply(gf.divide(a, b), b), a, "({a} / {b}) * {b}");
  }
});
