//! Full `order × order` multiplication and division tables.

use alloc::{boxed::Box, vec};
use core::marker::PhantomData;

use backend::KernelTier;
use traits::{Arithmetic, SmallBinaryField};

use super::{SimpleOnline, Strategy};

/// O(1) multiplication and division by direct lookup.
///
/// Tables are indexed `[a * order + b]` and built from [`SimpleOnline`].
/// Division by zero maps to zero in the table; it is still a caller error.
#[derive(Clone, Debug)]
pub struct FullTable<F: SmallBinaryField> {
  multiply: Box<[u8]>,
  divide: Box<[u8]>,
  _field: PhantomData<F>,
}

impl<F: SmallBinaryField> FullTable<F> {
  const ORDER: usize = F::ORDER as usize;

  /// Build both tables.
  #[must_use]
  pub fn new() -> Self {
    let simple = SimpleOnline::<F>::new();
    let mut multiply = vec![0u8; Self::ORDER * Self::ORDER];
    let mut divide = vec![0u8; Self::ORDER * Self::ORDER];

    for a in 0..Self::ORDER {
      for b in 0..Self::ORDER {
        let index = a * Self::ORDER + b;
        multiply[index] = simple.multiply(a as u8, b as u8);
        if b != 0 {
          divide[index] = simple.divide(a as u8, b as u8);
        }
      }
    }

    Self {
      multiply: multiply.into_boxed_slice(),
      divide: divide.into_boxed_slice(),
      _field: PhantomData,
    }
  }

  #[inline(always)]
  fn index(a: u8, b: u8) -> usize {
    debug_assert!(a <= F::MAX_VALUE && b <= F::MAX_VALUE);
    usize::from(a) * Self::ORDER + usize::from(b)
  }
}

impl<F: SmallBinaryField> Default for FullTable<F> {
  fn default() -> Self {
    Self::new()
  }
}

impl<F: SmallBinaryField> Arithmetic for FullTable<F> {
  type Value = u8;
  type Field = F;

  #[inline]
  fn add(&self, a: u8, b: u8) -> u8 {
    a ^ b
  }

  #[inline]
  fn subtract(&self, a: u8, b: u8) -> u8 {
    a ^ b
  }

  #[inline]
  fn multiply(&self, a: u8, b: u8) -> u8 {
    self.multiply[Self::index(a, b)]
  }

  #[inline]
  fn divide(&self, a: u8, b: u8) -> u8 {
    debug_assert!(b != 0, "division by zero");
    self.divide[Self::index(a, b)]
  }

  #[inline]
  fn invert(&self, a: u8) -> u8 {
    debug_assert!(a != 0, "zero has no inverse");
    self.divide[Self::index(1, a)]
  }

  #[inline]
  fn constant_row(&self, constant: u8) -> Option<&[u8]> {
    let start = usize::from(constant) * Self::ORDER;
    self.multiply.get(start..start + Self::ORDER)
  }
}

impl<F: SmallBinaryField> Strategy for FullTable<F> {
  const NAME: &'static str = "full-table";
  const TIER: KernelTier = KernelTier::Table;

  fn build() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::field::{Binary4, Binary8};

  #[test]
  fn table_sizes() {
    let table = FullTable::<Binary8>::new();
    assert_eq!(table.multiply.len(), 256 * 256);
    assert_eq!(FullTable::<Binary4>::new().divide.len(), 16 * 16);
  }

  #[test]
  fn constant_row_matches_multiply() {
    let table = FullTable::<Binary8>::new();
    let row = table.constant_row(0x53).unwrap();
    assert_eq!(row.len(), 256);
    for (b, &product) in row.iter().enumerate() {
      assert_eq!(product, table.multiply(0x53, b as u8));
    }
  }

  #[test]
  fn constant_row_out_of_range_is_none() {
    let table = FullTable::<Binary4>::new();
    assert!(table.constant_row(15).is_some());
    assert!(table.constant_row(16).is_none());
  }

  #[test]
  fn fixture_multiply_3_7() {
    assert_eq!(FullTable::<Binary8>::new().multiply(3, 7), 9);
  }
}
