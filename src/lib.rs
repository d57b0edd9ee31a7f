//! # simdwalk
//!
//! Alignment-aware SIMD traversal. `simdwalk` applies an operation across a contiguous
//! sequence of numbers, grouping elements into register-wide windows wherever the
//! address allows an aligned bulk load, and falling back to one element at a time for
//! the unaligned head and the ragged tail.
//!
//! ```text
//!  | head: scalars | body: aligned W-lane windows | tail: scalars |
//! ```
//!
//! Every element is visited exactly once, in increasing position order, whatever the
//! starting address or length. Bulk windows only ever touch addresses that are a
//! multiple of their alignment.
//!
//! ## Quick start
//!
//! ```rust
//! use simdwalk::ops::{Scale, Sum};
//!
//! let mut data: Vec<f64> = (1..=7).map(f64::from).collect();
//!
//! // Read-modify-write: every window is stored back.
//! simdwalk::for_each_mut(&mut data, Scale::new(10.0f64));
//! assert_eq!(data, [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
//!
//! // Read-only: no stores, the accumulator comes back with the result.
//! let sum = simdwalk::for_each(&data, Sum::<f64>::default());
//! assert_eq!(sum.value(), 280.0);
//! ```
//!
//! ## Strategy selection
//!
//! The path a call takes is fixed at compile time by two traits:
//!
//! - [`dispatch::Element`]: primitive numbers (and `bool`, `char`) are vectorizable;
//!   other types implement `Element` with an empty impl and get a plain sequential visit.
//! - [`dispatch::Access`]: [`ops::Inspect`] operations run under [`ReadOnly`] and never
//!   store; [`ops::Transform`] operations run under [`ReadWrite`] and store every window.
//!
//! ## Window width
//!
//! The build script picks the widest vector extension of the host (`avx512`, `avx2`,
//! `sse`, `neon`, or `fallback`) and [`simd::REGISTER_BYTES`] follows it. The
//! `*_window` entry points take an explicit window type instead.
//!
//! ## Modules
//!
//! - [`traverse`]: entry points (`traverse`, `traverse_n`, slice wrappers)
//! - [`alignment`]: head-length classifier and phase [`Plan`]
//! - [`dispatch`]: element and access-mode strategy selection
//! - [`simd`]: windows, vectors and lane masks
//! - [`reduce`]: `all_of`, `any_of`, `none_of`, `some_of`
//! - [`ops`]: operation traits and ready-made operations
//! - [`adapters`]: `ndarray` support
//! - [`utils`]: aligned buffers
//! - [`error`]: error types

pub mod adapters;
pub mod alignment;
pub mod dispatch;
mod engine;
pub mod error;
pub mod ops;
pub mod reduce;
pub mod simd;
pub mod traverse;
pub mod utils;

pub use alignment::Plan;
pub use dispatch::{Access, Element, ReadOnly, ReadWrite, Strategy, Vectorizable};
pub use error::{Result, WalkError};
pub use reduce::{all_of, any_of, none_of, some_of};
pub use traverse::{
    for_each, for_each_mut, for_each_n, for_each_n_mut, for_each_window, for_each_window_mut,
    plan, plan_with, traverse, traverse_n, traverse_with,
};
