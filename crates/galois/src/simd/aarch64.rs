//! aarch64 NEON kernel (`tbl` split-nibble lookup).
#![allow(unsafe_code)]

use core::arch::aarch64::*;

use super::{GRANULARITY, NibbleTable, portable};

/// Multiply 16 bytes per step with two `tbl` lookups.
///
/// # Safety
///
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
unsafe fn multiply_constant_neon(table: &NibbleTable, data: &mut [u8]) {
  let mut chunks = data.chunks_exact_mut(GRANULARITY);
  // SAFETY: every pointer below comes from a live 16-byte slice.
  unsafe {
    let low = vld1q_u8(table.low.as_ptr());
    let high = vld1q_u8(table.high.as_ptr());
    let mask = vdupq_n_u8(0x0F);

    for chunk in &mut chunks {
      let v = vld1q_u8(chunk.as_ptr());
      let lo = vandq_u8(v, mask);
      let hi = vshrq_n_u8::<4>(v);
      vst1q_u8(chunk.as_mut_ptr(), veorq_u8(vqtbl1q_u8(low, lo), vqtbl1q_u8(high, hi)));
    }
  }
  portable::multiply_constant(table, chunks.into_remainder());
}

/// Safe wrapper for the NEON kernel.
#[inline]
pub(super) fn multiply_constant_neon_safe(table: &NibbleTable, data: &mut [u8]) {
  // SAFETY: Dispatcher verifies NEON before selecting this kernel.
  unsafe { multiply_constant_neon(table, data) }
}
