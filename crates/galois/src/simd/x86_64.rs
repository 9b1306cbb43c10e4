//! x86_64 SSSE3 kernel (`pshufb` split-nibble lookup).
//!
//! # Safety
//!
//! Uses `unsafe` for x86 SIMD intrinsics. Callers must ensure SSSE3 is
//! available before executing the accelerated path (the dispatcher does this).
#![allow(unsafe_code)]

use core::arch::x86_64::*;

use super::{GRANULARITY, NibbleTable, portable};

/// Multiply 16 bytes per step with two `pshufb` lookups.
///
/// # Safety
///
/// The CPU must support SSSE3.
#[target_feature(enable = "ssse3")]
unsafe fn multiply_constant_ssse3(table: &NibbleTable, data: &mut [u8]) {
  let mut chunks = data.chunks_exact_mut(GRANULARITY);
  // SAFETY: every pointer below comes from a live 16-byte slice; unaligned
  // loads and stores are used so no alignment is assumed.
  unsafe {
    let low = _mm_loadu_si128(table.low.as_ptr().cast());
    let high = _mm_loadu_si128(table.high.as_ptr().cast());
    let mask = _mm_set1_epi8(0x0F);

    for chunk in &mut chunks {
      let ptr = chunk.as_mut_ptr().cast::<__m128i>();
      let v = _mm_loadu_si128(ptr);
      let lo = _mm_and_si128(v, mask);
      let hi = _mm_and_si128(_mm_srli_epi64::<4>(v), mask);
      _mm_storeu_si128(ptr, _mm_xor_si128(_mm_shuffle_epi8(low, lo), _mm_shuffle_epi8(high, hi)));
    }
  }
  portable::multiply_constant(table, chunks.into_remainder());
}

/// Safe wrapper for the SSSE3 kernel.
#[inline]
pub(super) fn multiply_constant_ssse3_safe(table: &NibbleTable, data: &mut [u8]) {
  // SAFETY: Dispatcher verifies SSSE3 before selecting this kernel.
  unsafe { multiply_constant_ssse3(table, data) }
}
