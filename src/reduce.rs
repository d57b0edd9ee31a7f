//! Boolean reductions over lane masks.
//!
//! Each reduction accepts anything implementing [`Mask`]: a [`LaneMask`] from a window
//! comparison, a `[bool; N]`, a `&[bool]`, or a single `bool`.
//!
//! | Reduction | Mask | `bool` |
//! |-----------|------|--------|
//! | [`all_of`] | every lane true | the value |
//! | [`any_of`] | at least one lane true | the value |
//! | [`none_of`] | no lane true | its negation |
//! | [`some_of`] | lanes are mixed | always `false` |
//!
//! ```rust
//! use simdwalk::reduce::{all_of, any_of, none_of, some_of};
//! use simdwalk::simd::Vector;
//!
//! let v = Vector::from_array([1.0f32, -2.0, 3.0, 4.0]);
//! let positive = v.lanes_gt(Vector::splat(0.0));
//! assert!(!all_of(positive));
//! assert!(any_of(positive));
//! assert!(some_of(positive));
//! assert!(none_of(false));
//! ```
//!
//! [`LaneMask`]: crate::simd::LaneMask

use crate::simd::Mask;

/// Whether every lane of `mask` is true.
#[inline]
pub fn all_of<M: Mask>(mask: M) -> bool {
    mask.is_full()
}

/// Whether at least one lane of `mask` is true.
#[inline]
pub fn any_of<M: Mask>(mask: M) -> bool {
    mask.is_not_empty()
}

/// Whether no lane of `mask` is true.
#[inline]
pub fn none_of<M: Mask>(mask: M) -> bool {
    mask.is_empty()
}

/// Whether `mask` has at least one true and at least one false lane.
#[inline]
pub fn some_of<M: Mask>(mask: M) -> bool {
    mask.is_mix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::LaneMask;

    #[test]
    fn test_bool_overloads() {
        assert!(all_of(true));
        assert!(!all_of(false));
        assert!(any_of(true));
        assert!(!any_of(false));
        assert!(!none_of(true));
        assert!(none_of(false));
        assert!(!some_of(true));
        assert!(!some_of(false));
    }

    #[test]
    fn test_slice_and_array_masks() {
        let mixed: &[bool] = &[false, true, false];
        assert!(some_of(mixed));
        assert!(!all_of(mixed));

        let full = [true; 5];
        assert!(all_of(full));
        assert!(!some_of(&full));
    }

    #[test]
    fn test_reference_to_lane_mask() {
        let mask = LaneMask::from_bits(0b0001, 4);
        assert!(any_of(&mask));
        assert!(some_of(&mask));
        assert!(!none_of(mask));
    }
}
