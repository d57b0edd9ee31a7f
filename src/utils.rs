//! Aligned storage for traversal inputs.
//!
//! Where a slice starts in memory decides how many scalar steps the head phase takes.
//! `AlignedVec` pins that start to an exact byte boundary, so callers (and the test
//! suite) can produce every starting alignment by slicing at an offset.

use std::alloc::{alloc, dealloc, Layout};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use crate::error::{Result, WalkError};

/// A fixed-length buffer whose first element sits on a chosen byte boundary.
///
/// The buffer is allocated once with `std::alloc::alloc` and freed with the same
/// layout on drop. Elements are `Copy`, so no per-element destructors run.
///
/// # Example
///
/// ```rust
/// use simdwalk::utils::AlignedVec;
///
/// let buffer = AlignedVec::from_slice(&[1.0f32, 2.0, 3.0], 64).unwrap();
/// assert_eq!(buffer.as_ptr() as usize % 64, 0);
/// assert_eq!(&buffer[..], &[1.0, 2.0, 3.0]);
/// ```
pub struct AlignedVec<T: Copy> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
}

impl<T: Copy> AlignedVec<T> {
    /// Creates a buffer of `len` copies of `value` aligned to `alignment` bytes.
    ///
    /// # Errors
    ///
    /// - [`WalkError::AlignmentNotPowerOfTwo`] if `alignment` is not a power of two.
    /// - [`WalkError::AlignmentBelowElement`] if `alignment < align_of::<T>()`.
    /// - [`WalkError::SizeOverflow`] if `len` elements exceed `isize::MAX` bytes.
    /// - [`WalkError::OutOfMemory`] if the allocator returns null.
    pub fn from_elem(len: usize, alignment: usize, value: T) -> Result<Self> {
        let buffer = Self::allocate(len, alignment)?;

        for i in 0..len {
            // SAFETY: `i < len` and the allocation holds `len` elements.
            unsafe { buffer.ptr.as_ptr().add(i).write(value) };
        }

        Ok(buffer)
    }

    /// Creates a buffer holding a copy of `data` aligned to `alignment` bytes.
    ///
    /// # Errors
    ///
    /// Same as [`AlignedVec::from_elem`].
    pub fn from_slice(data: &[T], alignment: usize) -> Result<Self> {
        let buffer = Self::allocate(data.len(), alignment)?;

        // SAFETY: both regions hold `data.len()` elements and cannot overlap since the
        // destination was just allocated.
        unsafe { ptr::copy_nonoverlapping(data.as_ptr(), buffer.ptr.as_ptr(), data.len()) };

        Ok(buffer)
    }

    /// Byte alignment the buffer was created with.
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }

    fn allocate(len: usize, alignment: usize) -> Result<Self> {
        if !alignment.is_power_of_two() {
            return Err(WalkError::AlignmentNotPowerOfTwo { alignment });
        }

        let element_alignment = mem::align_of::<T>();
        if alignment < element_alignment {
            return Err(WalkError::AlignmentBelowElement {
                alignment,
                element_alignment,
            });
        }

        let overflow = WalkError::SizeOverflow {
            len,
            element_size: mem::size_of::<T>(),
        };
        let size_bytes = len.checked_mul(mem::size_of::<T>()).ok_or(overflow)?;
        // With a valid power-of-two alignment, only an oversized request is rejected.
        let layout = Layout::from_size_align(size_bytes, alignment).map_err(|_| overflow)?;

        // Zero-sized buffers never touch the allocator; the address alone carries the
        // alignment.
        if size_bytes == 0 {
            let dangling = ptr::null_mut::<u8>().wrapping_add(alignment).cast::<T>();
            // SAFETY: `alignment` is a power of two, hence non-zero.
            let ptr = unsafe { NonNull::new_unchecked(dangling) };
            return Ok(Self { ptr, len, layout });
        }

        // SAFETY: the layout has a non-zero size.
        let raw = unsafe { alloc(layout) }.cast::<T>();
        let ptr = NonNull::new(raw).ok_or(WalkError::OutOfMemory {
            size: size_bytes,
            alignment,
        })?;

        Ok(Self { ptr, len, layout })
    }
}

impl<T: Copy> Drop for AlignedVec<T> {
    fn drop(&mut self) {
        if self.layout.size() > 0 {
            // SAFETY: allocated in `allocate` with exactly this layout.
            unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), self.layout) };
        }
    }
}

impl<T: Copy> Deref for AlignedVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: `ptr` is valid for `len` initialised elements for the buffer's lifetime.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy> DerefMut for AlignedVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: as in `deref`, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy + std::fmt::Debug> std::fmt::Debug for AlignedVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedVec")
            .field("alignment", &self.alignment())
            .field("data", &&self[..])
            .finish()
    }
}

// SAFETY: `AlignedVec` owns its allocation exclusively, like `Vec<T>`.
unsafe impl<T: Copy + Send> Send for AlignedVec<T> {}
// SAFETY: shared access only hands out `&[T]`.
unsafe impl<T: Copy + Sync> Sync for AlignedVec<T> {}
