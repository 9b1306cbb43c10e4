//! Scalar arithmetic strategies.
//!
//! | Strategy | Fields | Tables | Tier |
//! |----------|--------|--------|------|
//! | [`SimpleOnline`] | all | none | reference |
//! | [`LogTable`] | binary | `2 × order` | table |
//! | [`FullTable`] | binary, order ≤ 256 | `2 × order²` | table |
//! | [`OptimalPrime`] | [`Prime2325`](crate::field::Prime2325) | none | reference |
//!
//! Every strategy is built once, owns its tables, and is immutable
//! afterwards.

use backend::KernelTier;
use traits::Arithmetic;

mod full_table;
mod log_table;
mod optimal_prime;
mod simple_online;

pub use full_table::FullTable;
pub use log_table::LogTable;
pub use optimal_prime::OptimalPrime;
pub use simple_online::SimpleOnline;

/// A scalar arithmetic strategy an engine can be built from.
pub trait Strategy: Arithmetic + Sized + 'static {
  /// Human-readable name (e.g. `"log-table"`).
  const NAME: &'static str;

  /// Tier of the scalar path; reported when no kernel is in use.
  const TIER: KernelTier;

  /// Build the strategy, including all of its lookup tables.
  #[must_use]
  fn build() -> Self;
}
