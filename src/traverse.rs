//! Traversal entry points.
//!
//! The raw entry points mirror an iterator-pair interface: [`traverse`] takes a
//! `[first, last)` pointer range and [`traverse_n`] a start pointer and a count. Both
//! take an [`Access`] strategy ([`ReadOnly`] or [`ReadWrite`]) and return it, so state
//! accumulated by the operation comes back to the caller.
//!
//! The slice wrappers ([`for_each`], [`for_each_mut`] and their `_n` and `_window`
//! variants) are the safe surface: the borrow of the slice is the range, and the access
//! mode follows from the operation trait (`Inspect` for `&[T]`, `Transform` for
//! `&mut [T]`).
//!
//! Closures come back too. Rust flags an unused closure value, so call sites that
//! only care about side effects discard it with `let _ =`.
//!
//! # Panics in the operation
//!
//! A panic propagates out of the traversal with no rollback. Stores happen once per
//! step: a head or tail element is written as soon as its operation returns, while a
//! body window is transformed as a copy and written back only after the operation
//! finished with every lane. A panic inside a body window therefore leaves that whole
//! window as it was in memory, even for lanes the operation already saw.
//!
//! # Example
//!
//! ```rust
//! use simdwalk::ops::Sum;
//!
//! let mut samples: Vec<f32> = (1..=7).map(|i| i as f32).collect();
//!
//! let _ = simdwalk::for_each_mut(&mut samples, |x: &mut f32| *x *= 10.0);
//! assert_eq!(samples, [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
//!
//! let total = simdwalk::for_each(&samples, Sum::<f32>::default());
//! assert_eq!(total.value(), 280.0);
//! ```

use log::trace;

use crate::{
    alignment::Plan,
    dispatch::{Access, Element, ReadOnly, ReadWrite, Strategy, Token},
    engine,
    ops::{Inspect, Transform},
    simd::Window,
};

/// Applies `op` to every element of `[first, last)` and returns it.
///
/// Zero-sized element types denote an empty range. If `op` panics, elements of steps
/// that completed keep their stored values and the interrupted step stores nothing
/// (see the [module docs](self#panics-in-the-operation)).
///
/// # Safety
///
/// - `first` and `last` must belong to the same allocation, with `last` reachable from
///   `first` by whole-element steps (`last >= first`).
/// - Every element of the range must be initialised and valid for reads, and valid for
///   writes when `A::STORES` is true.
/// - No other reference may write to the range during the call (nor read it when
///   `A::STORES`).
#[inline]
pub unsafe fn traverse<T: Element, A: Access<T>>(first: *mut T, last: *mut T, op: A) -> A {
    debug_assert!(last >= first, "inverted range");

    let count = match std::mem::size_of::<T>() {
        0 => 0,
        _ => last.offset_from(first) as usize,
    };

    traverse_n(first, count, op)
}

/// Applies `op` to the `count` elements starting at `first` and returns it.
///
/// # Safety
///
/// `first` must be valid for reads of `count` consecutive initialised elements, and
/// for writes when `A::STORES` is true, with the same aliasing rules as [`traverse`].
#[inline]
pub unsafe fn traverse_n<T: Element, A: Access<T>>(first: *mut T, count: usize, mut op: A) -> A {
    let plan = T::walk(first, count, &mut op, Token::new());
    log_plan(Strategy::of::<T, A>(), &plan);
    op
}

/// Like [`traverse_n`], with `W` as the bulk window instead of the element type's
/// native vector.
///
/// # Safety
///
/// Same as [`traverse_n`]. `W` must keep `W::LANES * size_of::<T>()` a multiple of
/// `W::ALIGNMENT`.
#[inline]
pub unsafe fn traverse_with<T, W, A>(first: *mut T, count: usize, mut op: A) -> A
where
    T: Copy,
    W: Window<T>,
    A: Access<T>,
{
    let plan = engine::vectorized::<T, W, A>(first, count, &mut op);
    log_plan(Strategy::select(true, A::STORES), &plan);
    op
}

/// Runs a read-only operation over every element of `data`.
#[inline]
pub fn for_each<T: Element, F: Inspect<T>>(data: &[T], f: F) -> F {
    // SAFETY: the slice is valid for reads of `len` elements and `ReadOnly` never
    // writes through the pointer.
    unsafe { traverse_n(data.as_ptr().cast_mut(), data.len(), ReadOnly(f)) }.into_inner()
}

/// Runs a read-modify-write operation over every element of `data`.
#[inline]
pub fn for_each_mut<T: Element, F: Transform<T>>(data: &mut [T], f: F) -> F {
    // SAFETY: the exclusive borrow makes the slice valid for reads and writes.
    unsafe { traverse_n(data.as_mut_ptr(), data.len(), ReadWrite(f)) }.into_inner()
}

/// Runs a read-only operation over the first `count` elements of `data`.
///
/// # Panics
///
/// Panics if `count > data.len()`.
#[inline]
pub fn for_each_n<T: Element, F: Inspect<T>>(data: &[T], count: usize, f: F) -> F {
    for_each(&data[..count], f)
}

/// Runs a read-modify-write operation over the first `count` elements of `data`.
///
/// # Panics
///
/// Panics if `count > data.len()`.
#[inline]
pub fn for_each_n_mut<T: Element, F: Transform<T>>(data: &mut [T], count: usize, f: F) -> F {
    for_each_mut(&mut data[..count], f)
}

/// Runs a read-only operation over `data` using `W` as the bulk window.
///
/// ```rust
/// use simdwalk::ops::Sum;
/// use simdwalk::simd::Vector;
///
/// let data = [1u32, 2, 3, 4, 5, 6, 7];
/// let total = simdwalk::for_each_window::<Vector<u32, 4>, _, _>(&data, Sum::<u32>::default());
/// assert_eq!(total.value(), 28);
/// ```
#[inline]
pub fn for_each_window<W, T, F>(data: &[T], f: F) -> F
where
    T: Copy,
    W: Window<T>,
    F: Inspect<T>,
{
    // SAFETY: as in `for_each`.
    unsafe { traverse_with::<T, W, _>(data.as_ptr().cast_mut(), data.len(), ReadOnly(f)) }
        .into_inner()
}

/// Runs a read-modify-write operation over `data` using `W` as the bulk window.
#[inline]
pub fn for_each_window_mut<W, T, F>(data: &mut [T], f: F) -> F
where
    T: Copy,
    W: Window<T>,
    F: Transform<T>,
{
    // SAFETY: as in `for_each_mut`.
    unsafe { traverse_with::<T, W, _>(data.as_mut_ptr(), data.len(), ReadWrite(f)) }
        .into_inner()
}

/// Phase split `for_each` and `for_each_mut` would use for `data`.
///
/// ```rust
/// let data = vec![0u8; 1000];
/// let plan = simdwalk::plan(&data);
/// assert_eq!(plan.len(), 1000);
/// ```
pub fn plan<T: crate::dispatch::Vectorizable>(data: &[T]) -> Plan {
    plan_with::<T, T::Vector>(data)
}

/// Phase split for `data` with `W` as the bulk window.
pub fn plan_with<T: Copy, W: Window<T>>(data: &[T]) -> Plan {
    Plan::new(data.as_ptr(), data.len(), W::LANES, W::ALIGNMENT)
}

#[inline(always)]
fn log_plan(strategy: Strategy, plan: &Plan) {
    trace!("{strategy}: {plan}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::Vector;
    use crate::utils::AlignedVec;

    type V4 = Vector<u32, 4>;

    /// Triples minus one, counting elements.
    #[derive(Debug, Default, PartialEq)]
    struct Counted(usize);

    impl Transform<i64> for Counted {
        fn transform_one(&mut self, value: &mut i64) {
            *value = *value * 3 - 1;
            self.0 += 1;
        }
    }

    #[test]
    fn test_empty_range_never_calls() {
        let mut calls = 0;
        let data: [u32; 0] = [];
        let _ = for_each(&data, |_: &u32| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_traverse_and_traverse_n_agree() {
        let mut a: Vec<i64> = (0..37).collect();
        let mut b = a.clone();

        let range = a.as_mut_ptr_range();
        let calls_a = unsafe {
            traverse(range.start, range.end, ReadWrite(Counted::default())).into_inner()
        };
        let calls_b =
            unsafe { traverse_n(b.as_mut_ptr(), b.len(), ReadWrite(Counted::default())) }
                .into_inner();

        assert_eq!(a, b);
        assert_eq!(calls_a, calls_b);
        assert_eq!(calls_a.0, 37);
        assert_eq!(a[36], 107);
    }

    #[test]
    fn test_window_shapes_follow_plan() {
        let buffer = AlignedVec::from_slice(&[0u32; 16], 16).unwrap();
        let slice = &buffer[1..12];

        let mut shapes = Vec::new();
        struct Record<'a>(&'a mut Vec<usize>);
        impl Inspect<u32> for Record<'_> {
            fn inspect_one(&mut self, _: &u32) {
                self.0.push(1);
            }

            fn inspect<W: Window<u32>>(&mut self, _: &W) {
                self.0.push(W::LANES);
            }
        }

        for_each_window::<V4, _, _>(slice, Record(&mut shapes));
        // 11 elements one past a boundary: 3 scalars, 2 windows, 0 scalars
        assert_eq!(shapes, [1, 1, 1, 4, 4]);
        assert_eq!(
            plan_with::<u32, V4>(slice),
            Plan {
                head: 3,
                body: 2,
                tail: 0,
                lanes: 4
            }
        );
    }

    #[test]
    fn test_for_each_n_visits_prefix() {
        let mut data = [1u16, 2, 3, 4, 5, 6];
        let _ = for_each_n_mut(&mut data, 4, |x: &mut u16| *x = 0);
        assert_eq!(data, [0, 0, 0, 0, 5, 6]);

        let mut seen = 0;
        let _ = for_each_n(&data, 5, |x: &u16| seen += *x);
        assert_eq!(seen, 5);
    }

    #[test]
    #[should_panic]
    fn test_for_each_n_past_end_panics() {
        let data = [1u8, 2, 3];
        let _ = for_each_n(&data, 4, |_: &u8| {});
    }

    #[test]
    fn test_traverse_zero_sized_elements() {
        #[derive(Clone, Copy)]
        struct Unit;
        impl Element for Unit {}

        let mut data = [Unit, Unit, Unit];
        let mut calls = 0usize;
        let range = data.as_mut_ptr_range();
        let _ = unsafe { traverse(range.start, range.end, ReadOnly(|_: &Unit| calls += 1)) };
        assert_eq!(calls, 0);

        let _ = for_each(&data, |_: &Unit| calls += 1);
        assert_eq!(calls, 3);
    }
}
