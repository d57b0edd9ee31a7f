//! Register-shaped views over element sequences.
//!
//! A *window* holds either one element ([`Scalar`]) or a full register worth of lanes
//! ([`Vector`]) loaded from memory. The traversal engine drives windows through a
//! load → apply → store cycle; operations see them through the [`Window`] trait, so the
//! same code handles the scalar head and tail and the vectorized body.
//!
//! # Register width
//!
//! The build script inspects the host CPU and enables exactly one of the `avx512`,
//! `avx2`, `sse`, `neon` or `fallback` cfg flags. [`REGISTER_BYTES`] follows that flag
//! and sizes the native window of every vectorizable element type:
//!
//! | cfg | `REGISTER_BYTES` | `f32` lanes | `f64` lanes |
//! |-----|------------------|-------------|-------------|
//! | `avx512` | 64 | 16 | 8 |
//! | `avx2` | 32 | 8 | 4 |
//! | `sse`, `neon`, `fallback` | 16 | 4 | 2 |

pub mod mask;
pub mod vector;
pub mod window;

pub use mask::{LaneMask, Mask, MAX_LANES};
pub use vector::Vector;
pub use window::{Scalar, Window};

/// Width in bytes of the widest vector register selected at build time.
#[cfg(avx512)]
pub const REGISTER_BYTES: usize = 64;

/// Width in bytes of the widest vector register selected at build time.
#[cfg(all(avx2, not(avx512)))]
pub const REGISTER_BYTES: usize = 32;

/// Width in bytes of the widest vector register selected at build time.
#[cfg(not(any(avx2, avx512)))]
pub const REGISTER_BYTES: usize = 16;

/// Name of the instruction-set flag the build script selected.
pub const BACKEND: &str = if cfg!(avx512) {
    "avx512"
} else if cfg!(avx2) {
    "avx2"
} else if cfg!(sse) {
    "sse"
} else if cfg!(neon) {
    "neon"
} else {
    "fallback"
};

/// Number of `T` lanes in a native register.
pub const fn native_lanes<T>() -> usize {
    REGISTER_BYTES / std::mem::size_of::<T>()
}
