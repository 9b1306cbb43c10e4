//! Runtime CPU detection.
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via `is_x86_feature_detected!` / `is_aarch64_feature_detected!`)
//! - Caching (via `OnceLock` with `std`; recomputed from compile-time bits without)
//! - Miri fallback (always returns no features)

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Get detected CPU capabilities.
///
/// With `std`, the result is computed once and cached for the life of the
/// process. Under Miri, always returns [`Caps::NONE`] so that no SIMD
/// intrinsic is ever interpreted.
#[inline]
#[must_use]
pub fn get() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(all(not(miri), feature = "std"))]
  {
    use std::sync::OnceLock;
    static CACHED: OnceLock<Caps> = OnceLock::new();
    *CACHED.get_or_init(detect_uncached)
  }

  #[cfg(all(not(miri), not(feature = "std")))]
  {
    caps_static()
  }
}

/// Detect capabilities without caching.
#[must_use]
pub fn detect_uncached() -> Caps {
  let caps = caps_static();

  #[cfg(all(feature = "std", target_arch = "x86_64"))]
  let caps = caps.union(runtime_x86_64());

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-Time Static Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Returns CPU capabilities known at compile time.
///
/// Picks up features enabled via `-C target-feature=...` or
/// `-C target-cpu=native`; the compiler folds every branch away.
#[inline(always)]
#[must_use]
pub const fn caps_static() -> Caps {
  #[cfg(target_arch = "x86_64")]
  {
    compile_time_x86_64()
  }

  #[cfg(target_arch = "aarch64")]
  {
    compile_time_aarch64()
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    Caps::NONE
  }
}

#[cfg(target_arch = "x86_64")]
const fn compile_time_x86_64() -> Caps {
  use crate::caps::x86;

  // SSE2 is part of the x86_64 baseline.
  let mut caps = x86::SSE2;

  if cfg!(target_feature = "ssse3") {
    caps = caps.union(x86::SSSE3);
  }
  caps
}

#[cfg(target_arch = "aarch64")]
const fn compile_time_aarch64() -> Caps {
  // NEON is part of the AArch64 baseline.
  crate::caps::aarch64::NEON
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime Detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(feature = "std", target_arch = "x86_64"))]
fn runtime_x86_64() -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;
  if std::arch::is_x86_feature_detected!("ssse3") {
    caps |= x86::SSSE3;
  }
  caps
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  #[cfg(not(miri))]
  fn test_static_is_subset_of_detected() {
    assert!(detect_uncached().has(caps_static()));
  }

  #[test]
  #[cfg(not(miri))]
  fn test_get_is_cached_and_stable() {
    assert_eq!(get(), get());
    assert_eq!(get(), detect_uncached());
  }

  #[test]
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  fn test_x86_64_baseline() {
    assert!(get().has(crate::caps::x86::SSE2));
  }

  #[test]
  #[cfg(all(target_arch = "aarch64", not(miri)))]
  fn test_aarch64_baseline() {
    assert!(get().has(crate::caps::aarch64::NEON));
  }

  #[test]
  #[cfg(miri)]
  fn test_miri_reports_nothing() {
    assert!(get().is_empty());
  }
}
