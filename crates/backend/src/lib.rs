//! Backend crate: kernel selection primitives for galois.
//!
//! - **Dispatch**: pick the best capability-gated kernel, once
//! - **Tiers**: classify how a kernel computes, for introspection
//!
//! Selection happens at engine construction; the result is stored in the
//! engine and never re-evaluated. Caching of the capability probe itself
//! lives in `platform`.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod dispatch;
pub mod tier;

pub use dispatch::{Candidate, Selected, select};
// Re-export platform types for convenience.
pub use platform::{Caps, caps::Arch};
pub use tier::KernelTier;
