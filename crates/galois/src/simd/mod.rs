//! Split-nibble multiply-by-constant kernels.
//!
//! Multiplication by a constant `c` is GF(2)-linear on the bits of a byte, so
//! for any binary field stored in bytes
//!
//! ```text
//! c * b = low[b & 0x0F] ^ high[b >> 4]
//! ```
//!
//! with two 16-entry tables per constant. A 16-byte table fits in one vector
//! register and the lookup is a single byte shuffle (`pshufb` / `tbl`).
//!
//! | Kernel | Requires | Tier |
//! |--------|----------|------|
//! | `x86_64/ssse3` | SSE2 + SSSE3 | simd |
//! | `aarch64/neon` | NEON | simd |
//! | `portable` | - | reference for tests |

use alloc::{boxed::Box, vec::Vec};

use backend::{Candidate, Caps, Selected};
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use backend::KernelTier;
use traits::{Element, Field, PackedArithmetic};

use crate::packed::is_packed_constant;

#[cfg(target_arch = "aarch64")]
mod aarch64;
pub mod portable;
#[cfg(target_arch = "x86_64")]
mod x86_64;

/// Minimum alignment (bytes) the kernels are declared for.
pub const ALIGNMENT: usize = 16;

/// Bytes processed per vector step.
pub const GRANULARITY: usize = 16;

/// Kernel signature: multiply every byte of `data` in place.
///
/// Callers pass `data` aligned to [`ALIGNMENT`] with a length that is a
/// multiple of [`GRANULARITY`]; kernels still finish any remainder with the
/// portable walk.
pub type MultiplyConstantFn = fn(&NibbleTable, &mut [u8]);

/// Lookup tables for one constant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct NibbleTable {
  /// Products of the constant with `0x00..=0x0F`.
  pub low: [u8; 16],
  /// Products of the constant with `0x00, 0x10, ..., 0xF0`.
  pub high: [u8; 16],
}

impl NibbleTable {
  const ZERO: Self = Self {
    low: [0; 16],
    high: [0; 16],
  };
}

/// One [`NibbleTable`] per byte constant (8 KiB).
///
/// Entries for bytes that are not packed constants of the field stay zero.
#[derive(Clone, Debug)]
pub struct NibbleTables(Box<[NibbleTable; 256]>);

impl NibbleTables {
  /// Build tables from any byte-stored binary field arithmetic.
  ///
  /// Returns `None` for fields the kernels cannot serve (prime fields and
  /// anything wider than a byte).
  #[must_use]
  pub fn build<P: PackedArithmetic>(arithmetic: &P) -> Option<Self> {
    if !<P::Field as Field>::CHARACTERISTIC_TWO || <P::Value as Element>::BITS != 8 {
      return None;
    }

    let mut tables = Box::new([NibbleTable::ZERO; 256]);
    for (byte, table) in tables.iter_mut().enumerate() {
      let constant = P::Value::from_u32(byte as u32);
      if !is_packed_constant::<P::Field>(constant) {
        continue;
      }
      for nibble in 0..16u32 {
        let i = nibble as usize;
        table.low[i] = arithmetic.packed_multiply_constant(P::Value::from_u32(nibble), constant).to_u32() as u8;
        table.high[i] = arithmetic
          .packed_multiply_constant(P::Value::from_u32(nibble << 4), constant)
          .to_u32() as u8;
      }
    }
    Some(Self(tables))
  }

  /// Tables for `constant`.
  #[inline(always)]
  #[must_use]
  pub fn get(&self, constant: u8) -> &NibbleTable {
    &self.0[usize::from(constant)]
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Candidates
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
const CANDIDATES: &[Candidate<MultiplyConstantFn>] = &[Candidate::new(
  "x86_64/ssse3",
  platform::caps::x86::SHUFFLE_READY,
  KernelTier::Simd,
  x86_64::multiply_constant_ssse3_safe,
)];

#[cfg(target_arch = "aarch64")]
const CANDIDATES: &[Candidate<MultiplyConstantFn>] = &[Candidate::new(
  "aarch64/neon",
  platform::caps::aarch64::SHUFFLE_READY,
  KernelTier::Simd,
  aarch64::multiply_constant_neon_safe,
)];

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
const CANDIDATES: &[Candidate<MultiplyConstantFn>] = &[];

/// Pick the best kernel `caps` allows, if any.
///
/// `caps` is intersected with [`platform::caps()`] first: a caller can rule
/// kernels out but never enable one the host cannot execute.
#[inline]
#[must_use]
pub fn resolve(caps: Caps) -> Option<Selected<MultiplyConstantFn>> {
  backend::select(caps & platform::caps(), CANDIDATES)
}

// ─────────────────────────────────────────────────────────────────────────────
// Cross-kernel testing
// ─────────────────────────────────────────────────────────────────────────────

/// Output of one kernel, for cross-kernel equivalence checks.
#[derive(Debug, Clone)]
pub struct KernelResult {
  /// Kernel name (`"portable"` or a candidate name).
  pub name: &'static str,
  /// The multiplied bytes.
  pub output: Vec<u8>,
}

/// Run the portable walk and every kernel the host supports on `data`.
///
/// The first entry is always the portable walk; all outputs must match it.
#[must_use]
pub fn run_all_kernels(table: &NibbleTable, data: &[u8]) -> Vec<KernelResult> {
  let mut results = Vec::new();

  let mut output = data.to_vec();
  portable::multiply_constant(table, &mut output);
  results.push(KernelResult {
    name: "portable",
    output,
  });

  let caps = platform::caps();
  for candidate in CANDIDATES.iter().filter(|c| caps.has(c.requires)) {
    let mut output = data.to_vec();
    (candidate.func)(table, &mut output);
    results.push(KernelResult {
      name: candidate.name,
      output,
    });
  }
  results
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    arithmetic::SimpleOnline,
    field::{Binary, Binary4, Binary8, Prime2325},
    packed::{Packed, pack},
  };

  fn check_tables<F>(packed: &Packed<SimpleOnline<F>>)
  where
    F: Field<Value = u8>,
  {
    let tables = NibbleTables::build(packed).unwrap();
    for element in 0..=(F::MAX_VALUE) {
      let constant = pack::<F>(element);
      let table = tables.get(constant);
      for byte in 0..=255u8 {
        let via_tables = table.low[usize::from(byte & 0x0F)] ^ table.high[usize::from(byte >> 4)];
        assert_eq!(via_tables, packed.packed_multiply_constant(byte, constant), "{} c={constant:#04x} b={byte:#04x}", F::NAME);
      }
    }
  }

  #[test]
  fn tables_agree_with_packed_multiply() {
    check_tables(&Packed::new(SimpleOnline::<Binary>::new()));
    check_tables(&Packed::new(SimpleOnline::<Binary4>::new()));
    check_tables(&Packed::new(SimpleOnline::<Binary8>::new()));
  }

  #[test]
  fn prime_field_has_no_tables() {
    assert!(NibbleTables::build(&Packed::new(SimpleOnline::<Prime2325>::new())).is_none());
  }

  #[test]
  fn resolve_never_exceeds_host() {
    let everything = Caps::from_raw([u64::MAX; 2]);
    let host = platform::caps();
    let selected = resolve(everything);
    assert_eq!(selected.map(|s| s.name), resolve(host).map(|s| s.name));
    if let Some(name) = selected.map(|s| s.name) {
      let candidate = CANDIDATES.iter().find(|c| c.name == name).unwrap();
      assert!(host.has(candidate.requires), "{name} selected without host support");
    }
  }

  #[test]
  fn resolve_without_caps_is_none() {
    assert!(resolve(Caps::NONE).is_none());
  }

  #[test]
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  fn resolve_names_x86_kernel() {
    let selected = resolve(platform::caps::x86::SHUFFLE_READY);
    if platform::caps().has(platform::caps::x86::SHUFFLE_READY) {
      assert_eq!(selected.map(|s| s.name), Some("x86_64/ssse3"));
    } else {
      assert!(selected.is_none());
    }
  }

  #[test]
  fn all_kernels_agree() {
    let tables = NibbleTables::build(&Packed::new(SimpleOnline::<Binary8>::new())).unwrap();
    let data: Vec<u8> = (0..=255u8).chain(0..=255u8).collect();
    for constant in [0u8, 1, 2, 0x1D, 0x80, 0xFF] {
      let results = run_all_kernels(tables.get(constant), &data);
      let (reference, rest) = results.split_first().unwrap();
      for result in rest {
        assert_eq!(result.output, reference.output, "{} disagrees for c={constant:#04x}", result.name);
      }
    }
  }
}
