//! Core algebra traits for galois.
//!
//! This crate provides the interfaces every field engine layer conforms to.
//! It is `no_std` compatible and has zero dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Element`] | Storage integer (`u8`, `u16`, `u32`) |
//! | [`Field`] | Compile-time field descriptor |
//! | [`Arithmetic`] | Per-element add/subtract/multiply/divide/invert |
//! | [`PackedArithmetic`] | The same, on values holding several sub-byte elements |
//! | [`RegionInfo`] | Alignment/granularity contract of a region implementation |
//! | [`RegionArithmetic`] | Element-wise operations over buffers |
//!
//! # Error Types
//!
//! - [`ArithmeticError`] - caller-contract violation reported by checked operations
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod arithmetic;
pub mod element;
pub mod error;
pub mod field;
pub mod region;

pub use arithmetic::{Arithmetic, PackedArithmetic};
pub use element::Element;
pub use error::ArithmeticError;
pub use field::{BinaryField, Field, SmallBinaryField};
pub use region::{RegionArithmetic, RegionInfo};
