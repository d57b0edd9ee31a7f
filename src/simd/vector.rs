//! Portable N-lane vector window.
//!
//! `Vector<T, N>` stores its lanes as a plain `[T; N]` and leaves instruction selection
//! to the compiler. The build script only picks the lane count; whether the element-wise
//! loops below become packed arithmetic depends on the target features rustc is given
//! (for example `-C target-cpu=native`).
//!
//! # Alignment
//!
//! A vector is aligned to its own byte size (`N * size_of::<T>()`), which must be a
//! power of two. Consecutive vectors therefore stay aligned once the first one is.
//!
//! # Example
//!
//! ```rust
//! use simdwalk::simd::{Mask, Vector, Window};
//!
//! let data = [1.0f32, 2.0, 3.0, 4.0];
//! let mut v = Vector::<f32, 4>::from_array(data);
//! v *= 10.0f32;
//! assert_eq!(v.to_array(), [10.0, 20.0, 30.0, 40.0]);
//! assert!(v.lanes_gt(Vector::splat(5.0)).is_full());
//! ```

use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use num::Zero;

use crate::simd::{mask::LaneMask, window::Window};

/// `N` lanes of `T` processed together.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(transparent)]
pub struct Vector<T, const N: usize> {
    elements: [T; N],
}

impl<T: Copy, const N: usize> Vector<T, N> {
    /// Post-monomorphization check of the lane shape.
    const SHAPE_OK: () = assert!(
        N > 0 && (N * std::mem::size_of::<T>()).is_power_of_two(),
        "vector byte size must be a non-zero power of two"
    );

    /// Wraps an array of lanes.
    #[inline(always)]
    pub const fn from_array(elements: [T; N]) -> Self {
        Self { elements }
    }

    /// Broadcasts `value` to every lane.
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self { elements: [value; N] }
    }

    /// Copies the lanes out.
    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        self.elements
    }

    /// Horizontal sum of all lanes.
    #[inline(always)]
    pub fn sum(&self) -> T
    where
        T: Zero + Add<Output = T>,
    {
        self.elements
            .iter()
            .fold(T::zero(), |acc, &lane| acc + lane)
    }

    /// Lane-wise `self == other`.
    ///
    /// # Panics
    ///
    /// Panics if `N > 64`.
    #[inline(always)]
    pub fn lanes_eq(&self, other: Self) -> LaneMask
    where
        T: PartialEq,
    {
        LaneMask::from_fn(N, |lane| self.elements[lane] == other.elements[lane])
    }

    /// Lane-wise `self < other`.
    ///
    /// # Panics
    ///
    /// Panics if `N > 64`.
    #[inline(always)]
    pub fn lanes_lt(&self, other: Self) -> LaneMask
    where
        T: PartialOrd,
    {
        LaneMask::from_fn(N, |lane| self.elements[lane] < other.elements[lane])
    }

    /// Lane-wise `self > other`.
    ///
    /// # Panics
    ///
    /// Panics if `N > 64`.
    #[inline(always)]
    pub fn lanes_gt(&self, other: Self) -> LaneMask
    where
        T: PartialOrd,
    {
        LaneMask::from_fn(N, |lane| self.elements[lane] > other.elements[lane])
    }
}

impl<T: Copy + Default, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::splat(T::default())
    }
}

impl<T: Copy, const N: usize> Window<T> for Vector<T, N> {
    const LANES: usize = N;
    const ALIGNMENT: usize = N * std::mem::size_of::<T>();

    #[inline(always)]
    unsafe fn load(ptr: *const T) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SHAPE_OK;
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(
            ptr as usize % Self::ALIGNMENT == 0,
            "bulk load from an address not aligned to {} bytes",
            Self::ALIGNMENT
        );

        Self {
            elements: ptr.cast::<[T; N]>().read(),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut T) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(
            ptr as usize % Self::ALIGNMENT == 0,
            "bulk store to an address not aligned to {} bytes",
            Self::ALIGNMENT
        );

        ptr.cast::<[T; N]>().write(self.elements);
    }

    #[inline(always)]
    fn lanes(&self) -> &[T] {
        &self.elements
    }

    #[inline(always)]
    fn lanes_mut(&mut self) -> &mut [T] {
        &mut self.elements
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    fn index(&self, lane: usize) -> &T {
        &self.elements[lane]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    fn index_mut(&mut self, lane: usize) -> &mut T {
        &mut self.elements[lane]
    }
}

impl<T: Copy, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(elements: [T; N]) -> Self {
        Self::from_array(elements)
    }
}

impl<T: Copy, const N: usize> TryFrom<&[T]> for Vector<T, N> {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[T]) -> Result<Self, Self::Error> {
        <[T; N]>::try_from(slice).map(Self::from_array)
    }
}

// Lane-wise operators between vectors.
macro_rules! impl_vector_op {
    ($($op:ident::$method:ident, $assign:ident::$assign_method:ident);* $(;)?) => {$(
        impl<T: Copy + $op<Output = T>, const N: usize> $op for Vector<T, N> {
            type Output = Self;

            #[inline(always)]
            fn $method(mut self, rhs: Self) -> Self {
                for (lane, &r) in self.elements.iter_mut().zip(rhs.elements.iter()) {
                    *lane = $op::$method(*lane, r);
                }
                self
            }
        }

        impl<T: Copy + $op<Output = T>, const N: usize> $assign for Vector<T, N> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = $op::$method(*self, rhs);
            }
        }
    )*};
}

impl_vector_op! {
    Add::add, AddAssign::add_assign;
    Sub::sub, SubAssign::sub_assign;
    Mul::mul, MulAssign::mul_assign;
    Div::div, DivAssign::div_assign;
}

// Broadcast operators with a scalar right-hand side, per primitive type.
macro_rules! impl_scalar_op {
    ($($t:ty),* $(,)?) => {$(
        impl_scalar_op!(@op $t, Add::add, AddAssign::add_assign);
        impl_scalar_op!(@op $t, Sub::sub, SubAssign::sub_assign);
        impl_scalar_op!(@op $t, Mul::mul, MulAssign::mul_assign);
        impl_scalar_op!(@op $t, Div::div, DivAssign::div_assign);
    )*};
    (@op $t:ty, $op:ident::$method:ident, $assign:ident::$assign_method:ident) => {
        impl<const N: usize> $op<$t> for Vector<$t, N> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: $t) -> Self {
                $op::$method(self, Vector::splat(rhs))
            }
        }

        impl<const N: usize> $assign<$t> for Vector<$t, N> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: $t) {
                *self = $op::$method(*self, Vector::splat(rhs));
            }
        }
    };
}

impl_scalar_op!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
