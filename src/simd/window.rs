//! The [`Window`] trait and its one-lane implementation.

use std::fmt;

use crate::simd::mask::LaneMask;

/// A register-shaped copy of `LANES` consecutive elements.
///
/// Windows are plain values: [`Window::load`] copies lanes out of memory and
/// [`Window::store_at`] copies them back. Nothing is written unless the caller stores,
/// which is how read-only traversals leave their input untouched.
///
/// Implementations must keep `LANES * size_of::<T>()` a multiple of `ALIGNMENT` so that
/// consecutive windows stay aligned once the first one is.
pub trait Window<T: Copy>: Copy {
    /// Number of elements held by the window.
    const LANES: usize;

    /// Byte boundary `load` and `store_at` require. Always a power of two.
    const ALIGNMENT: usize;

    /// Copies `LANES` elements starting at `ptr` into a new window.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `LANES` elements and aligned to `ALIGNMENT`.
    unsafe fn load(ptr: *const T) -> Self;

    /// Copies the window's lanes to `LANES` elements starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `LANES` elements and aligned to `ALIGNMENT`.
    unsafe fn store_at(&self, ptr: *mut T);

    /// The lanes, in memory order.
    fn lanes(&self) -> &[T];

    /// The lanes, in memory order, for in-place updates.
    fn lanes_mut(&mut self) -> &mut [T];

    /// Replaces every lane with `f(lane)`.
    #[inline(always)]
    fn map(&mut self, mut f: impl FnMut(T) -> T) {
        for lane in self.lanes_mut() {
            *lane = f(*lane);
        }
    }

    /// Calls `f` with every lane, in memory order.
    #[inline(always)]
    fn for_each_lane(&self, mut f: impl FnMut(T)) {
        for &lane in self.lanes() {
            f(lane);
        }
    }

    /// Evaluates `predicate` on every lane.
    ///
    /// # Panics
    ///
    /// Panics if the window has more than [`MAX_LANES`](crate::simd::MAX_LANES) (64)
    /// lanes, the most a [`LaneMask`] can hold.
    #[inline(always)]
    fn mask(&self, mut predicate: impl FnMut(T) -> bool) -> LaneMask {
        LaneMask::from_fn(Self::LANES, |lane| predicate(self.lanes()[lane]))
    }
}

/// A one-lane window.
///
/// The head and tail phases load `Scalar`s. It behaves exactly like a one-lane
/// [`Vector`](crate::simd::Vector), so operations need no scalar special case.
#[derive(Clone, Copy, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Scalar<T>(pub T);

impl<T: Copy> Window<T> for Scalar<T> {
    const LANES: usize = 1;
    const ALIGNMENT: usize = std::mem::align_of::<T>();

    #[inline(always)]
    unsafe fn load(ptr: *const T) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        Scalar(ptr.read())
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut T) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        ptr.write(self.0);
    }

    #[inline(always)]
    fn lanes(&self) -> &[T] {
        std::slice::from_ref(&self.0)
    }

    #[inline(always)]
    fn lanes_mut(&mut self) -> &mut [T] {
        std::slice::from_mut(&mut self.0)
    }
}

impl<T: fmt::Debug> fmt::Debug for Scalar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Scalar").field(&self.0).finish()
    }
}

impl<T> From<T> for Scalar<T> {
    fn from(value: T) -> Self {
        Scalar(value)
    }
}
