//! Scalar table walk; the reference every vector kernel is checked against.

use super::NibbleTable;

/// Multiply every byte of `data` in place, one byte at a time.
#[inline]
pub fn multiply_constant(table: &NibbleTable, data: &mut [u8]) {
  for byte in data {
    *byte = table.low[usize::from(*byte & 0x0F)] ^ table.high[usize::from(*byte >> 4)];
  }
}
