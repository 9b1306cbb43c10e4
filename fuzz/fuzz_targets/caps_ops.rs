//! Fuzz target for Caps set operations.
//!
//! Tests algebraic properties:
//! - Commutativity and associativity of union and intersection
//! - Distributivity of intersection over union
//! - Difference never intersects what it removed

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use platform::Caps;

#[derive(Arbitrary, Debug)]
struct Input {
  a: [u64; 2],
  b: [u64; 2],
  c: [u64; 2],
}

fuzz_target!(|input: Input| {
  let a = Caps::from_raw(input.a);
  let b = Caps::from_raw(input.b);
  let c = Caps::from_raw(input.c);

  // ─── Commutativity ───
  assert_eq!(a | b, b | a, "union must be commutative");
  assert_eq!(a & b, b & a, "intersection must be commutative");

  // ─── Associativity ───
  assert_eq!((a | b) | c, a | (b | c), "union must be associative");
  assert_eq!((a & b) & c, a & (b & c), "intersection must be associative");

  // ─── Distributivity ───
  assert_eq!(a & (b | c), (a & b) | (a & c), "intersection must distribute over union");

  // ─── Subsets ───
  assert!((a | b).has(a) && (a | b).has(b), "union must contain both operands");
  assert!(a.has(a & b) && b.has(a & b), "both operands must contain the intersection");

  // ─── Difference ───
  let d = a.difference(b);
  assert!(a.has(d), "difference must be a subset");
  assert!((d & b).is_empty(), "difference must not intersect the removed set");
  assert_eq!(d | (a & b), a, "difference and intersection must partition");

  // ─── Narrowing a probe ───
  let host = platform::caps();
  assert!(host.has(a & host), "intersecting with the host never widens it");
});
