//! Engine dispatch introspection.
//!
//! ```
//! use galois::{Engine, arithmetic::FullTable, field::Binary8};
//!
//! let engine = Engine::<FullTable<Binary8>>::new();
//! let info = engine.describe();
//! assert_eq!(info.field, "binary8");
//! assert_eq!(info.strategy, "full-table");
//! println!("{info}");
//! ```

use core::fmt;

use backend::KernelTier;

use crate::config::RegionForce;

/// What an engine resolved at construction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EngineInfo {
  /// Field name, e.g. `"binary8"`.
  pub field: &'static str,
  /// Scalar strategy name, e.g. `"log-table"`.
  pub strategy: &'static str,
  /// Region kernel name, or `"portable"`.
  pub kernel: &'static str,
  /// Tier of the fastest path in use.
  pub tier: KernelTier,
  /// Force mode after clamping to the probe's capabilities.
  pub force: RegionForce,
  /// Smallest aligned body handed to the kernel.
  pub threshold: usize,
  /// Reported region alignment (bytes).
  pub alignment: usize,
  /// Reported region granularity (elements).
  pub granularity: usize,
}

impl fmt::Display for EngineInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}/{}: kernel={} tier={} force={} alignment={} granularity={}",
      self.field,
      self.strategy,
      self.kernel,
      self.tier,
      self.force.as_str(),
      self.alignment,
      self.granularity
    )
  }
}

impl fmt::Debug for EngineInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EngineInfo")
      .field("field", &self.field)
      .field("strategy", &self.strategy)
      .field("kernel", &self.kernel)
      .field("tier", &format_args!("{}", self.tier))
      .field("force", &format_args!("{}", self.force.as_str()))
      .field("threshold", &self.threshold)
      .field("alignment", &self.alignment)
      .field("granularity", &self.granularity)
      .finish()
  }
}
