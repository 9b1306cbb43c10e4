//! Kernel dispatch: capability-gated selection.
//!
//! - [`Candidate`]: a kernel with capability requirements
//! - [`Selected`]: the result of kernel selection
//! - [`select`]: choose the best kernel from a candidate list
//!
//! # Usage
//!
//! Algorithm crates register accelerated kernels as an ordered list of
//! `Candidate`s, best first. The portable path is not a candidate: when no
//! candidate matches, [`select`] returns `None` and the caller keeps its
//! fallback.
//!
//! ```
//! use backend::{
//!   dispatch::{Candidate, select},
//!   tier::KernelTier,
//! };
//! use platform::caps::{Caps, x86};
//!
//! fn double(x: u8) -> u8 {
//!   x.wrapping_mul(2)
//! }
//!
//! let candidates = [Candidate::new("x86_64/ssse3", x86::SHUFFLE_READY, KernelTier::Simd, double as fn(u8) -> u8)];
//!
//! assert!(select(Caps::NONE, &candidates).is_none());
//! let chosen = select(x86::SHUFFLE_READY, &candidates);
//! assert_eq!(chosen.map(|s| s.name), Some("x86_64/ssse3"));
//! ```

use platform::Caps;

use crate::tier::KernelTier;

// ─────────────────────────────────────────────────────────────────────────────
// Core Types
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate kernel with capability requirements.
///
/// Candidates are ordered from best to worst. The dispatcher selects the
/// first candidate whose requirements are satisfied by the detected capabilities.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "x86_64/ssse3").
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// Acceleration tier the kernel belongs to.
  pub tier: KernelTier,
  /// The kernel itself (usually a function pointer).
  pub func: F,
}

impl<F> Candidate<F> {
  /// Create a new candidate.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, tier: KernelTier, func: F) -> Self {
    Self {
      name,
      requires,
      tier,
      func,
    }
  }
}

/// The result of kernel selection.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Human-readable name of the selected kernel.
  pub name: &'static str,
  /// Tier of the selected kernel.
  pub tier: KernelTier,
  /// The selected kernel.
  pub func: F,
}

impl<F> Selected<F> {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, tier: KernelTier, func: F) -> Self {
    Self { name, tier, func }
  }
}

/// Select the best kernel from a candidate list.
///
/// Returns the first candidate whose `requires` is satisfied by `caps`, or
/// `None` when nothing matches (including an empty list).
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Option<Selected<F>> {
  candidates
    .iter()
    .find(|candidate| caps.has(candidate.requires))
    .map(|candidate| Selected::new(candidate.name, candidate.tier, candidate.func))
}
