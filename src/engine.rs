//! The three-phase walk.
//!
//! ```text
//!  first                                                      first + len
//!    |  head (scalar)  |   body (aligned windows of W)   | tail (scalar) |
//!    | 0..W-1 elements | W | W | ... | W                 | 0..W-1        |
//!                      ^ first address multiple of ALIGNMENT
//! ```
//!
//! Every step is load → apply → store, with the store compiled out for read-only
//! access. The phases always run in this order, so elements are visited in strictly
//! increasing position.

use crate::{
    alignment::Plan,
    dispatch::Access,
    simd::{Scalar, Window},
};

/// Visits `len` elements one by one, without windows.
///
/// # Safety
///
/// `first` must be valid for reads of `len` elements, and for writes when `A::STORES`.
#[inline(always)]
pub(crate) unsafe fn sequential<T, A: Access<T>>(first: *mut T, len: usize, op: &mut A) -> Plan {
    for i in 0..len {
        op.apply_in_place(first.add(i));
    }

    Plan::sequential(len)
}

/// Walks `len` elements in head, body and tail phases with bulk windows of type `W`.
///
/// # Safety
///
/// `first` must be valid for reads of `len` elements, and for writes when `A::STORES`.
/// `W` must honour the [`Window`] contract: `W::LANES * size_of::<T>()` is a multiple
/// of `W::ALIGNMENT`.
#[inline(always)]
pub(crate) unsafe fn vectorized<T, W, A>(first: *mut T, len: usize, op: &mut A) -> Plan
where
    T: Copy,
    W: Window<T>,
    A: Access<T>,
{
    debug_assert!(
        (W::LANES * std::mem::size_of::<T>()) % W::ALIGNMENT == 0,
        "window of {} lanes cannot stay aligned to {} bytes",
        W::LANES,
        W::ALIGNMENT
    );

    let plan = Plan::new(first.cast_const(), len, W::LANES, W::ALIGNMENT);
    let mut cursor = first;

    for _ in 0..plan.head {
        step::<T, Scalar<T>, A>(cursor, op);
        cursor = cursor.add(1);
    }

    for _ in 0..plan.body {
        step::<T, W, A>(cursor, op);
        cursor = cursor.add(W::LANES);
    }

    for _ in 0..plan.tail {
        step::<T, Scalar<T>, A>(cursor, op);
        cursor = cursor.add(1);
    }

    plan
}

/// One load → apply → (store) cycle at `ptr`.
#[inline(always)]
unsafe fn step<T, W, A>(ptr: *mut T, op: &mut A)
where
    T: Copy,
    W: Window<T>,
    A: Access<T>,
{
    let mut window = W::load(ptr.cast_const());
    op.apply(&mut window);

    if A::STORES {
        window.store_at(ptr);
    }
}
