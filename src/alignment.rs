//! Alignment classification: where the scalar head ends and bulk windows may start.
//!
//! Alignment depends on the runtime address of the first element, never on the
//! element type alone, so the split is recomputed on every traversal.

use std::fmt;
use std::mem;

/// Whether `ptr` is a multiple of `alignment` bytes.
#[inline(always)]
pub fn is_aligned<T>(ptr: *const T, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two(), "alignment must be a power of two");
    (ptr as usize) & (alignment - 1) == 0
}

/// Number of leading elements that must be visited one at a time before `ptr` reaches
/// a multiple of `alignment` bytes.
///
/// For element-aligned pointers the result lies in `[0, alignment / size_of::<T>() - 1]`.
/// The whole range (`len`) is returned when it is shorter than that distance, or when
/// whole-element steps can never land on the boundary (zero-sized `T`, or an address
/// that is not a multiple of `size_of::<T>()`).
///
/// ```rust
/// use simdwalk::alignment::head_len;
///
/// let base = 0x1000 as *const f32;
/// assert_eq!(head_len(base, 16, 100), 0);
/// assert_eq!(head_len(base.wrapping_add(1), 16, 100), 3);
/// assert_eq!(head_len(base.wrapping_add(1), 16, 2), 2);
/// ```
#[inline(always)]
pub fn head_len<T>(ptr: *const T, alignment: usize, len: usize) -> usize {
    debug_assert!(alignment.is_power_of_two(), "alignment must be a power of two");

    let misalignment = (ptr as usize) & (alignment - 1);
    if misalignment == 0 {
        return 0;
    }

    let gap = alignment - misalignment;
    let size = mem::size_of::<T>();
    if size == 0 || gap % size != 0 {
        return len;
    }

    (gap / size).min(len)
}

/// How a range of `len` elements splits into the three traversal phases.
///
/// `head + body * lanes + tail == len` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Scalar steps before the first aligned address.
    pub head: usize,
    /// Number of full bulk windows.
    pub body: usize,
    /// Scalar steps after the last full window.
    pub tail: usize,
    /// Width of one bulk window.
    pub lanes: usize,
}

impl Plan {
    /// Splits `len` elements starting at `ptr` for windows of `lanes` elements aligned
    /// to `alignment` bytes.
    #[inline(always)]
    pub fn new<T>(ptr: *const T, len: usize, lanes: usize, alignment: usize) -> Self {
        debug_assert!(lanes > 0, "a window holds at least one lane");

        let head = head_len(ptr, alignment, len);
        let rest = len - head;
        let body = rest / lanes;

        Self {
            head,
            body,
            tail: rest - body * lanes,
            lanes,
        }
    }

    /// The plan of a plain element-by-element visit.
    pub fn sequential(len: usize) -> Self {
        Self {
            head: len,
            body: 0,
            tail: 0,
            lanes: 1,
        }
    }

    /// Total number of elements covered.
    pub fn len(&self) -> usize {
        self.head + self.body * self.lanes + self.tail
    }

    /// True when the plan covers no element.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements handled by bulk windows.
    pub fn bulk_elements(&self) -> usize {
        self.body * self.lanes
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "head {} + body {}x{} + tail {} = {}",
            self.head,
            self.body,
            self.lanes,
            self.tail,
            self.len()
        )
    }
}
