//! Finite-field arithmetic with runtime-dispatched region kernels.
//!
//! An [`Engine`] composes one field, one scalar strategy and a region stack
//! whose vector kernels are chosen once, at construction, from the host's
//! capabilities.
//!
//! # Fields
//!
//! | Type | Field | Storage |
//! |------|-------|---------|
//! | [`Binary`](field::Binary) | GF(2) | `u8`, 8 per byte |
//! | [`Binary4`](field::Binary4) | GF(2^4) | `u8`, 2 per byte |
//! | [`Binary8`](field::Binary8) | GF(2^8) | `u8` |
//! | [`Binary16`](field::Binary16) | GF(2^16) | `u16` |
//! | [`Prime2325`](field::Prime2325) | GF(2^32 - 5) | `u32` |
//!
//! # Strategies
//!
//! | Strategy | Fields |
//! |----------|--------|
//! | [`SimpleOnline`](arithmetic::SimpleOnline) | all |
//! | [`LogTable`](arithmetic::LogTable) | binary |
//! | [`FullTable`](arithmetic::FullTable) | binary, order ≤ 256 |
//! | [`OptimalPrime`](arithmetic::OptimalPrime) | GF(2^32 - 5) |
//!
//! Invalid combinations (a log table over the prime field, say) do not
//! compile.
//!
//! # Hardware Acceleration
//!
//! Region multiply-by-constant over `u8` binary fields uses a split-nibble
//! shuffle kernel:
//!
//! | Arch | Feature | Kernel |
//! |------|---------|--------|
//! | x86_64 | SSSE3 | `x86_64/ssse3` |
//! | aarch64 | NEON | `aarch64/neon` |
//!
//! Set `GALOIS_REGION_FORCE=portable` to disable kernels for a process.
//!
//! # Example
//!
//! ```rust
//! use galois::{Arithmetic, Engine, RegionArithmetic, arithmetic::FullTable, field::Binary8};
//!
//! let gf = Engine::<FullTable<Binary8>>::new();
//! assert_eq!(gf.multiply(0x80, 2), 0x1D);
//! assert_eq!(gf.multiply(gf.invert(0x53), 0x53), 1);
//!
//! let src = [1u8, 2, 3, 4];
//! let mut parity = [0u8; 4];
//! gf.region_multiply_add(&mut parity, &src, 7);
//! assert_eq!(parity[0], 7);
//! ```
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded use. Without it only
//! compile-time CPU features are used and the environment is never read.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod arithmetic;
pub mod config;
pub mod engine;
pub mod field;
pub mod introspect;
pub mod packed;
mod polynomial;
pub mod region;
pub mod simd;

pub use backend::KernelTier;
pub use engine::{Engine, FullTableEngine, LogTableEngine, OptimalPrimeEngine, SimpleOnlineEngine};
pub use introspect::EngineInfo;
pub use traits::{
  Arithmetic, ArithmeticError, BinaryField, Element, Field, PackedArithmetic, RegionArithmetic, RegionInfo,
  SmallBinaryField,
};
