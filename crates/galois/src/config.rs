//! Region dispatch configuration (overrides + threshold).
//!
//! Two knobs decide whether an engine uses an accelerated region kernel:
//! - a forced mode (`auto`, `portable`, `accelerated`)
//! - the smallest aligned body worth handing to the kernel
//!
//! With `std`, both can be overridden from the environment:
//!
//! | Variable | Values |
//! |----------|--------|
//! | `GALOIS_REGION_FORCE` | `auto`, `portable` (`scalar`, `table`), `accelerated` (`simd`, `kernel`) |
//! | `GALOIS_REGION_THRESHOLD` | bytes, decimal |
//!
//! The environment is read once per process. Forced modes are always clamped
//! to the capabilities the engine's probe reports.

use platform::Caps;

/// Forced region kernel selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RegionForce {
  /// Use a kernel when one is available and the body meets the threshold.
  #[default]
  Auto,
  /// Never use an accelerated kernel.
  Portable,
  /// Use an accelerated kernel for every aligned body, however short.
  ///
  /// Falls back to [`Auto`](Self::Auto) when no kernel can run.
  Accelerated,
}

impl RegionForce {
  /// Lowercase name, as accepted by `GALOIS_REGION_FORCE`.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Accelerated => "accelerated",
    }
  }

  /// Parse a force name, case-insensitively. Unknown names yield `None`.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable")
      || value.eq_ignore_ascii_case("scalar")
      || value.eq_ignore_ascii_case("table")
    {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("accelerated")
      || value.eq_ignore_ascii_case("simd")
      || value.eq_ignore_ascii_case("kernel")
    {
      return Some(Self::Accelerated);
    }
    None
  }
}

/// Region dispatch configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionConfig {
  /// Requested force mode.
  pub force: RegionForce,
  /// Aligned bodies shorter than this many bytes stay on the portable loop.
  pub threshold: usize,
}

impl RegionConfig {
  /// Default kernel threshold in bytes.
  pub const DEFAULT_THRESHOLD: usize = 64;

  /// Configuration with a forced mode and the default threshold.
  #[inline]
  #[must_use]
  pub const fn forced(force: RegionForce) -> Self {
    Self {
      force,
      threshold: Self::DEFAULT_THRESHOLD,
    }
  }

  /// The force mode after clamping to `caps`, and the threshold the
  /// dispatcher should use (`0` when accelerated is forced).
  #[must_use]
  pub fn effective(self, caps: Caps) -> (RegionForce, usize) {
    let force = clamp_force_to_caps(self.force, caps);
    let threshold = match force {
      RegionForce::Accelerated => 0,
      RegionForce::Auto | RegionForce::Portable => self.threshold,
    };
    (force, threshold)
  }
}

impl Default for RegionConfig {
  fn default() -> Self {
    Self::forced(RegionForce::Auto)
  }
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  force: Option<RegionForce>,
  threshold: Option<usize>,
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn var(name: &str) -> Option<std::string::String> {
    let value = std::env::var(name).ok()?;
    if value.trim().is_empty() { None } else { Some(value) }
  }

  Overrides {
    force: var("GALOIS_REGION_FORCE").and_then(|v| RegionForce::parse(&v)),
    threshold: var("GALOIS_REGION_THRESHOLD").and_then(|v| v.trim().parse::<usize>().ok()),
  }
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

/// Downgrade a forced accelerated mode when no kernel can run on `caps`.
#[inline]
#[must_use]
pub fn clamp_force_to_caps(requested: RegionForce, caps: Caps) -> RegionForce {
  match requested {
    RegionForce::Auto | RegionForce::Portable => requested,
    RegionForce::Accelerated => {
      if crate::simd::resolve(caps).is_some() {
        RegionForce::Accelerated
      } else {
        RegionForce::Auto
      }
    }
  }
}

/// The process configuration: defaults with environment overrides applied.
#[inline]
#[must_use]
pub fn get() -> RegionConfig {
  apply(RegionConfig::default(), overrides())
}

#[inline]
fn apply(base: RegionConfig, ov: Overrides) -> RegionConfig {
  RegionConfig {
    force: ov.force.unwrap_or(base.force),
    threshold: ov.threshold.unwrap_or(base.threshold),
  }
}
