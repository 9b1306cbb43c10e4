//! Kernel acceleration tiers.
//!
//! Tiers represent how a field engine computes its region operations, from
//! the reference scalar loop to byte-shuffle SIMD. Higher tiers are faster
//! but have stricter hardware or memory requirements.
//!
//! # Tier Overview
//!
//! | Tier | Name | Description |
//! |------|------|-------------|
//! | 0 | Reference | Computed arithmetic (shift-and-add, Euclid) - always available |
//! | 1 | Table | Precomputed log/antilog or full multiplication tables |
//! | 2 | Simd | 16-byte table shuffles (SSSE3 `pshufb`, NEON `tbl`) |

use core::fmt;

/// Kernel acceleration tier.
///
/// Tiers implement `Ord` with higher tiers being "greater", so
/// `tier >= KernelTier::Simd` asks "is a vector kernel in use?".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KernelTier {
  /// Tier 0: computed arithmetic.
  ///
  /// Always available, no tables beyond what the field itself needs.
  #[default]
  Reference = 0,

  /// Tier 1: table-driven scalar arithmetic.
  ///
  /// Always available. Pays table memory (up to `order²` entries) for
  /// constant-time lookups.
  Table = 1,

  /// Tier 2: byte-shuffle SIMD.
  ///
  /// Available on:
  /// - x86_64: SSSE3
  /// - aarch64: NEON
  Simd = 2,
}

impl KernelTier {
  /// Human-readable tier name.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Reference => "reference",
      Self::Table => "table",
      Self::Simd => "simd",
    }
  }
}

impl fmt::Display for KernelTier {
  #[inline]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
