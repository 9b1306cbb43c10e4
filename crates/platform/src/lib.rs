//! CPU capability detection for the galois workspace.
//!
//! This crate is the single source of truth for "which vector instructions
//! may run here". Field engines never call `is_x86_feature_detected!`
//! themselves; they ask a [`Probe`].
//!
//! # Core Types
//!
//! - [`Caps`]: what instructions can run on this machine
//! - [`Probe`]: where an engine gets its [`Caps`] from
//! - [`Detected`]: the process-wide, cached probe
//! - [`Fixed`]: a probe with a caller-chosen answer, for tests and bare metal
//!
//! ```
//! use platform::{Detected, Fixed, Probe, caps::Caps};
//!
//! let host = Detected.caps();
//! assert_eq!(host, platform::caps());
//!
//! let none = Fixed(Caps::NONE);
//! assert!(!none.has_feature("ssse3"));
//! ```

#![no_std]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

#[cfg(feature = "std")]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod caps;
pub mod detect;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

pub use caps::{Arch, Caps};

/// Get the detected CPU capabilities.
///
/// Cached in a `OnceLock` with `std`; compile-time features only without.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::get()
}

/// One-line human-readable summary of the detected capabilities.
///
/// Format: `"<arch>: feat1 feat2 ..."`, or `"<arch>: portable"` when nothing
/// beyond scalar code is available.
#[cfg(feature = "std")]
#[must_use]
pub fn describe() -> std::string::String {
  use core::fmt::Write;

  let caps = caps();
  let mut out = std::string::String::new();
  let _ = write!(out, "{}:", Arch::current());
  if caps.is_empty() {
    out.push_str(" portable");
  }
  for name in caps.feature_names() {
    out.push(' ');
    out.push_str(name);
  }
  out
}

// ─────────────────────────────────────────────────────────────────────────────
// Probe
// ─────────────────────────────────────────────────────────────────────────────

/// A source of CPU capabilities.
///
/// Engines query a probe once, at construction, and never again.
pub trait Probe {
  /// The full capability set this probe reports.
  fn caps(&self) -> Caps;

  /// Whether the named feature (a `target_feature` name such as `"ssse3"`)
  /// is available. Unknown names report `false`.
  fn has_feature(&self, name: &str) -> bool {
    Caps::from_name(name).is_some_and(|bit| self.caps().has(bit))
  }
}

/// The host's capabilities, as detected (and cached) by [`caps()`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Detected;

impl Probe for Detected {
  #[inline]
  fn caps(&self) -> Caps {
    caps()
  }
}

/// A probe that reports exactly the capabilities it holds.
///
/// `Fixed(Caps::NONE)` simulates a machine with no accelerated path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fixed(pub Caps);

impl Probe for Fixed {
  #[inline]
  fn caps(&self) -> Caps {
    self.0
  }
}

impl<P: Probe + ?Sized> Probe for &P {
  #[inline]
  fn caps(&self) -> Caps {
    (**self).caps()
  }
}
