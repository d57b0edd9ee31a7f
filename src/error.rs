//! Errors from building aligned storage.
//!
//! The traversal engine itself never fails: its preconditions are caller contracts.
//! The only fallible step is [`AlignedVec`](crate::utils::AlignedVec) construction,
//! and every variant below is one way that can go wrong.

use std::fmt;

/// Why an aligned buffer could not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkError {
    /// The requested alignment is not a power of two.
    AlignmentNotPowerOfTwo {
        /// Requested byte alignment.
        alignment: usize,
    },
    /// The requested alignment is weaker than the element type's own.
    AlignmentBelowElement {
        /// Requested byte alignment.
        alignment: usize,
        /// `align_of` of the element type.
        element_alignment: usize,
    },
    /// `len` elements do not fit in a single allocation.
    SizeOverflow {
        /// Requested element count.
        len: usize,
        /// `size_of` of the element type.
        element_size: usize,
    },
    /// The global allocator returned null.
    OutOfMemory {
        /// Requested size in bytes.
        size: usize,
        /// Requested byte alignment.
        alignment: usize,
    },
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            WalkError::AlignmentNotPowerOfTwo { alignment } => {
                write!(f, "alignment {alignment} is not a power of two")
            }
            WalkError::AlignmentBelowElement {
                alignment,
                element_alignment,
            } => write!(
                f,
                "alignment {alignment} is below the element alignment {element_alignment}"
            ),
            WalkError::SizeOverflow { len, element_size } => write!(
                f,
                "{len} elements of {element_size} bytes exceed the maximum allocation size"
            ),
            WalkError::OutOfMemory { size, alignment } => write!(
                f,
                "allocation of {size} bytes aligned to {alignment} failed"
            ),
        }
    }
}

impl std::error::Error for WalkError {}

/// Result type alias for simdwalk operations.
pub type Result<T> = std::result::Result<T, WalkError>;
