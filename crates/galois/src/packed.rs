//! Packed arithmetic for sub-byte fields.
//!
//! GF(2) stores eight elements per byte and GF(2^4) two. Element `i` of a
//! value occupies bits `[i * degree, (i + 1) * degree)`. For every other
//! field a value holds exactly one element and packed arithmetic is plain
//! scalar arithmetic.
//!
//! A *packed constant* holds the same element in every position. Multiplying
//! by one is a single lookup in a per-constant row of `256` precomputed
//! bytes, built here for every element of the field.

use alloc::{boxed::Box, vec::Vec};

use traits::{Arithmetic, Element, Field, PackedArithmetic};

/// Elements per storage value.
#[inline(always)]
const fn lanes<F: Field>() -> u32 {
  F::ELEMENTS_PER_VALUE
}

/// Mask selecting one element.
#[inline(always)]
const fn element_mask<F: Field>() -> u32 {
  if F::DEGREE >= 32 { u32::MAX } else { (1u32 << F::DEGREE) - 1 }
}

/// Replicate `element` into every packed position.
///
/// ```
/// use galois::{field::{Binary, Binary4, Binary8}, packed::pack};
///
/// assert_eq!(pack::<Binary>(1), 0xFF);
/// assert_eq!(pack::<Binary4>(0x7), 0x77);
/// assert_eq!(pack::<Binary8>(0x7), 0x07);
/// ```
#[must_use]
pub fn pack<F: Field>(element: F::Value) -> F::Value {
  let element = element.to_u32() & element_mask::<F>();
  let mut packed = 0u32;
  for lane in 0..lanes::<F>() {
    packed |= element << (lane * F::DEGREE);
  }
  F::Value::from_u32(packed)
}

/// Whether every packed element of `constant` is identical.
///
/// Always `true` for fields with one element per value.
///
/// ```
/// use galois::{field::{Binary, Binary4}, packed::is_packed_constant};
///
/// assert!(is_packed_constant::<Binary>(0x00));
/// assert!(is_packed_constant::<Binary>(0xFF));
/// assert!(!is_packed_constant::<Binary>(0x01));
/// assert!(is_packed_constant::<Binary4>(0xAA));
/// assert!(!is_packed_constant::<Binary4>(0xAB));
/// ```
#[must_use]
pub fn is_packed_constant<F: Field>(constant: F::Value) -> bool {
  lanes::<F>() == 1 || pack::<F>(constant) == constant
}

/// Apply `op` to each pair of packed elements of `a` and `b`.
#[inline]
fn lanewise<F: Field>(a: F::Value, b: F::Value, mut op: impl FnMut(F::Value, F::Value) -> F::Value) -> F::Value {
  let mask = element_mask::<F>();
  let (a, b) = (a.to_u32(), b.to_u32());
  let mut result = 0u32;
  for lane in 0..lanes::<F>() {
    let shift = lane * F::DEGREE;
    let x = F::Value::from_u32((a >> shift) & mask);
    let y = F::Value::from_u32((b >> shift) & mask);
    result |= op(x, y).to_u32() << shift;
  }
  F::Value::from_u32(result)
}

/// Lifts a scalar strategy to whole storage values.
///
/// For sub-byte fields this owns an `order × 256` table: row `c` maps every
/// byte to that byte times the packed constant `pack(c)`.
#[derive(Clone, Debug)]
pub struct Packed<A: Arithmetic> {
  scalar: A,
  rows: Box<[A::Value]>,
}

impl<A: Arithmetic> Packed<A> {
  const LANES: u32 = lanes::<A::Field>();
  const ROW: usize = 256;

  /// Wrap `scalar`, building the packed-constant rows if the field needs them.
  #[must_use]
  pub fn new(scalar: A) -> Self {
    let rows = if Self::LANES > 1 {
      let order = <A::Field as Field>::ORDER as usize;
      let mut rows = Vec::with_capacity(order * Self::ROW);
      for element in 0..order {
        let constant = A::Value::from_u32(element as u32);
        for byte in 0..Self::ROW {
          let value = A::Value::from_u32(byte as u32);
          rows.push(lanewise::<A::Field>(value, pack::<A::Field>(constant), |x, y| scalar.multiply(x, y)));
        }
      }
      rows.into_boxed_slice()
    } else {
      Box::default()
    };
    Self { scalar, rows }
  }

  /// The wrapped scalar strategy.
  #[inline]
  #[must_use]
  pub fn scalar(&self) -> &A {
    &self.scalar
  }

  /// Row for a packed constant; sub-byte fields only.
  #[inline]
  fn row(&self, constant: A::Value) -> &[A::Value] {
    let start = (constant.to_u32() & element_mask::<A::Field>()) as usize * Self::ROW;
    &self.rows[start..start + Self::ROW]
  }
}

impl<A: Arithmetic> Arithmetic for Packed<A> {
  type Value = A::Value;
  type Field = A::Field;

  #[inline]
  fn add(&self, a: A::Value, b: A::Value) -> A::Value {
    self.scalar.add(a, b)
  }

  #[inline]
  fn subtract(&self, a: A::Value, b: A::Value) -> A::Value {
    self.scalar.subtract(a, b)
  }

  #[inline]
  fn multiply(&self, a: A::Value, b: A::Value) -> A::Value {
    self.scalar.multiply(a, b)
  }

  #[inline]
  fn divide(&self, a: A::Value, b: A::Value) -> A::Value {
    self.scalar.divide(a, b)
  }

  #[inline]
  fn invert(&self, a: A::Value) -> A::Value {
    self.scalar.invert(a)
  }

  #[inline]
  fn negate(&self, a: A::Value) -> A::Value {
    self.scalar.negate(a)
  }

  #[inline]
  fn constant_row(&self, constant: A::Value) -> Option<&[A::Value]> {
    self.scalar.constant_row(constant)
  }
}

impl<A: Arithmetic> PackedArithmetic for Packed<A> {
  #[inline]
  fn packed_add(&self, a: A::Value, b: A::Value) -> A::Value {
    if Self::LANES == 1 {
      self.scalar.add(a, b)
    } else {
      A::Value::from_u32(a.to_u32() ^ b.to_u32())
    }
  }

  #[inline]
  fn packed_subtract(&self, a: A::Value, b: A::Value) -> A::Value {
    if Self::LANES == 1 {
      self.scalar.subtract(a, b)
    } else {
      A::Value::from_u32(a.to_u32() ^ b.to_u32())
    }
  }

  #[inline]
  fn packed_multiply(&self, a: A::Value, b: A::Value) -> A::Value {
    if Self::LANES == 1 {
      self.scalar.multiply(a, b)
    } else if is_packed_constant::<A::Field>(b) {
      self.row(b)[a.to_usize()]
    } else {
      lanewise::<A::Field>(a, b, |x, y| self.scalar.multiply(x, y))
    }
  }

  #[inline]
  fn packed_divide(&self, a: A::Value, b: A::Value) -> A::Value {
    if Self::LANES == 1 {
      self.scalar.divide(a, b)
    } else if is_packed_constant::<A::Field>(b) {
      let element = A::Value::from_u32(b.to_u32() & element_mask::<A::Field>());
      self.row(self.scalar.invert(element))[a.to_usize()]
    } else {
      lanewise::<A::Field>(a, b, |x, y| self.scalar.divide(x, y))
    }
  }

  #[inline]
  fn packed_invert(&self, a: A::Value) -> A::Value {
    if Self::LANES == 1 {
      self.scalar.invert(a)
    } else {
      lanewise::<A::Field>(a, a, |x, _| self.scalar.invert(x))
    }
  }

  #[inline]
  fn packed_multiply_constant(&self, a: A::Value, constant: A::Value) -> A::Value {
    debug_assert!(is_packed_constant::<A::Field>(constant), "{constant:?} is not a packed constant");
    if Self::LANES == 1 {
      self.scalar.multiply(a, constant)
    } else {
      self.row(constant)[a.to_usize()]
    }
  }

  #[inline]
  fn packed_constant_row(&self, constant: A::Value) -> Option<&[A::Value]> {
    if Self::LANES == 1 { self.scalar.constant_row(constant) } else { Some(self.row(constant)) }
  }
}
