//! Lane masks: per-lane truth values produced by window comparisons.

use std::fmt;

/// Lane-level truth queries backing the reductions in [`crate::reduce`].
///
/// A single `bool` is a mask with one lane, which makes `is_mix` always `false` for it.
pub trait Mask {
    /// Every lane is true. Vacuously true for zero lanes.
    fn is_full(&self) -> bool;

    /// At least one lane is true.
    fn is_not_empty(&self) -> bool;

    /// No lane is true.
    fn is_empty(&self) -> bool {
        !self.is_not_empty()
    }

    /// At least one lane is true and at least one lane is false.
    fn is_mix(&self) -> bool {
        self.is_not_empty() && !self.is_full()
    }
}

/// Maximum number of lanes a [`LaneMask`] can hold.
pub const MAX_LANES: usize = u64::BITS as usize;

/// A bit-packed mask of up to 64 lanes; lane `i` is bit `i`.
///
/// 64 lanes covers a 512-bit register of bytes, the widest window the build selects.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LaneMask {
    bits: u64,
    lanes: u32,
}

impl LaneMask {
    /// Builds a mask of `lanes` lanes, lane `i` set to `f(i)`.
    ///
    /// # Panics
    ///
    /// Panics if `lanes > 64`.
    pub fn from_fn(lanes: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        assert!(lanes <= MAX_LANES, "a lane mask holds at most {MAX_LANES} lanes");

        let bits = (0..lanes)
            .filter(|&lane| f(lane))
            .fold(0u64, |bits, lane| bits | (1 << lane));

        Self {
            bits,
            lanes: lanes as u32,
        }
    }

    /// Builds a mask from raw bits, ignoring bits at or above `lanes`.
    ///
    /// # Panics
    ///
    /// Panics if `lanes > 64`.
    pub fn from_bits(bits: u64, lanes: usize) -> Self {
        assert!(lanes <= MAX_LANES, "a lane mask holds at most {MAX_LANES} lanes");
        Self {
            bits: bits & Self::full_bits(lanes),
            lanes: lanes as u32,
        }
    }

    /// A mask with every lane set.
    pub fn splat(value: bool, lanes: usize) -> Self {
        Self::from_bits(if value { u64::MAX } else { 0 }, lanes)
    }

    /// Raw lane bits.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of lanes.
    pub fn len(&self) -> usize {
        self.lanes as usize
    }

    /// True when the mask has no lanes at all.
    pub fn is_zero_width(&self) -> bool {
        self.lanes == 0
    }

    /// Value of lane `lane`, or `None` past the end.
    pub fn get(&self, lane: usize) -> Option<bool> {
        (lane < self.len()).then(|| self.bits & (1 << lane) != 0)
    }

    /// Number of true lanes.
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Index of the first true lane.
    pub fn first_set(&self) -> Option<usize> {
        (self.bits != 0).then(|| self.bits.trailing_zeros() as usize)
    }

    fn full_bits(lanes: usize) -> u64 {
        match lanes {
            MAX_LANES => u64::MAX,
            n => (1u64 << n) - 1,
        }
    }
}

impl Mask for LaneMask {
    #[inline]
    fn is_full(&self) -> bool {
        self.bits == Self::full_bits(self.len())
    }

    #[inline]
    fn is_not_empty(&self) -> bool {
        self.bits != 0
    }
}

impl fmt::Debug for LaneMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lanes: String = (0..self.len())
            .map(|lane| if self.bits & (1 << lane) != 0 { '1' } else { '0' })
            .collect();
        write!(f, "LaneMask[{lanes}]")
    }
}

impl<const N: usize> From<[bool; N]> for LaneMask {
    fn from(lanes: [bool; N]) -> Self {
        LaneMask::from_fn(N, |lane| lanes[lane])
    }
}

impl Mask for bool {
    #[inline]
    fn is_full(&self) -> bool {
        *self
    }

    #[inline]
    fn is_not_empty(&self) -> bool {
        *self
    }

    #[inline]
    fn is_mix(&self) -> bool {
        false
    }
}

impl Mask for [bool] {
    fn is_full(&self) -> bool {
        self.iter().all(|&lane| lane)
    }

    fn is_not_empty(&self) -> bool {
        self.iter().any(|&lane| lane)
    }
}

impl<const N: usize> Mask for [bool; N] {
    fn is_full(&self) -> bool {
        self.as_slice().is_full()
    }

    fn is_not_empty(&self) -> bool {
        self.as_slice().is_not_empty()
    }
}

impl<M: Mask + ?Sized> Mask for &M {
    fn is_full(&self) -> bool {
        (**self).is_full()
    }

    fn is_not_empty(&self) -> bool {
        (**self).is_not_empty()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn is_mix(&self) -> bool {
        (**self).is_mix()
    }
}
