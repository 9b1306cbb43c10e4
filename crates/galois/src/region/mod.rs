//! Region (buffer) arithmetic and its dispatch layers.
//!
//! Three layers, composed by [`Engine`](crate::Engine):
//!
//! - [`RegionLoop`]: element-wise loop over a [`PackedArithmetic`](traits::PackedArithmetic)
//! - [`RegionDispatcher`]: capability-gated kernel for multiply-by-constant, resolved once
//! - [`EqualAlignment`]: per-call choice between an optimized and a basic stack

mod dispatcher;
mod equal_alignment;
mod generic;

pub use dispatcher::{MultiplyConstantKernel, RegionDispatcher};
pub use equal_alignment::EqualAlignment;
pub use generic::RegionLoop;

/// Debug-only checks shared by every region layer.
#[inline(always)]
pub(crate) fn debug_check_lengths<V>(dest: &[V], src: &[V]) {
  debug_assert!(!dest.is_empty(), "empty destination region");
  debug_assert_eq!(dest.len(), src.len(), "source and destination lengths differ");
}
