//! Operations applied by a traversal.
//!
//! An operation is written once and called with whatever window the current phase
//! loaded: a [`Scalar`](crate::simd::Scalar) in the head and tail, a full
//! [`Vector`](crate::simd::Vector) in the body. Opaque element types skip windows and
//! get the `*_one` methods directly.
//!
//! - [`Inspect`] reads its argument and never writes it. Traversals with an `Inspect`
//!   operation skip the store step.
//! - [`Transform`] mutates its argument; every window is stored back.
//!
//! Closures implement both traits: `FnMut(&T)` is an `Inspect<T>`, `FnMut(&mut T)` a
//! `Transform<T>`. Both are called once per element.
//!
//! # Writing a window-aware operation
//!
//! ```rust
//! use simdwalk::ops::Inspect;
//! use simdwalk::simd::Window;
//!
//! /// Counts how many windows of each width were seen.
//! #[derive(Default)]
//! struct Shapes {
//!     scalar: usize,
//!     bulk: usize,
//! }
//!
//! impl Inspect<u32> for Shapes {
//!     fn inspect_one(&mut self, _: &u32) {
//!         self.scalar += 1;
//!     }
//!
//!     fn inspect<W>(&mut self, _: &W)
//!     where
//!         W: Window<u32>,
//!     {
//!         match W::LANES {
//!             1 => self.scalar += 1,
//!             _ => self.bulk += 1,
//!         }
//!     }
//! }
//!
//! let data: Vec<u32> = (0..100).collect();
//! let shapes = simdwalk::for_each(&data, Shapes::default());
//! assert!(shapes.scalar + shapes.bulk > 0);
//! ```

use std::ops::{Add, Mul};

use num::Zero;

use crate::simd::Window;

/// A read-only operation.
pub trait Inspect<T> {
    /// Visits a single element.
    fn inspect_one(&mut self, value: &T);

    /// Visits every lane of a window. Defaults to [`Inspect::inspect_one`] per lane.
    #[inline(always)]
    fn inspect<W>(&mut self, window: &W)
    where
        T: Copy,
        W: Window<T>,
    {
        for lane in window.lanes() {
            self.inspect_one(lane);
        }
    }
}

/// A read-modify-write operation.
pub trait Transform<T> {
    /// Updates a single element in place.
    fn transform_one(&mut self, value: &mut T);

    /// Updates every lane of a window. Defaults to [`Transform::transform_one`] per lane.
    #[inline(always)]
    fn transform<W>(&mut self, window: &mut W)
    where
        T: Copy,
        W: Window<T>,
    {
        for lane in window.lanes_mut() {
            self.transform_one(lane);
        }
    }
}

impl<T, F: FnMut(&T)> Inspect<T> for F {
    #[inline(always)]
    fn inspect_one(&mut self, value: &T) {
        self(value)
    }
}

impl<T, F: FnMut(&mut T)> Transform<T> for F {
    #[inline(always)]
    fn transform_one(&mut self, value: &mut T) {
        self(value)
    }
}

/// Running sum of every visited element.
///
/// ```rust
/// use simdwalk::ops::Sum;
///
/// let total = simdwalk::for_each(&[1i32, 2, 3, 4, 5, 6, 7], Sum::<i32>::default());
/// assert_eq!(total.value(), 28);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sum<T> {
    total: T,
}

impl<T: Copy> Sum<T> {
    /// Starts accumulating from `initial`.
    pub fn new(initial: T) -> Self {
        Self { total: initial }
    }

    /// Accumulated total.
    pub fn value(&self) -> T {
        self.total
    }
}

impl<T: Copy + Zero + Add<Output = T>> Inspect<T> for Sum<T> {
    #[inline(always)]
    fn inspect_one(&mut self, value: &T) {
        self.total = self.total + *value;
    }

    // Lanes are folded into a window-local partial sum first.
    #[inline(always)]
    fn inspect<W>(&mut self, window: &W)
    where
        T: Copy,
        W: Window<T>,
    {
        let partial = window
            .lanes()
            .iter()
            .fold(T::zero(), |acc, &lane| acc + lane);
        self.total = self.total + partial;
    }
}

/// Multiplies every element by a constant factor.
///
/// ```rust
/// use simdwalk::ops::Scale;
///
/// let mut data = vec![1i32, 2, 3, 4, 5, 6, 7];
/// simdwalk::for_each_mut(&mut data, Scale::new(10i32));
/// assert_eq!(data, [10, 20, 30, 40, 50, 60, 70]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale<T> {
    factor: T,
}

impl<T: Copy> Scale<T> {
    /// Creates a scaling operation.
    pub fn new(factor: T) -> Self {
        Self { factor }
    }
}

impl<T: Copy + Mul<Output = T>> Transform<T> for Scale<T> {
    #[inline(always)]
    fn transform_one(&mut self, value: &mut T) {
        *value = *value * self.factor;
    }

    #[inline(always)]
    fn transform<W>(&mut self, window: &mut W)
    where
        T: Copy,
        W: Window<T>,
    {
        let factor = self.factor;
        window.map(|lane| lane * factor);
    }
}
