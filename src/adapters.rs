//! Traversal of `ndarray` arrays.
//!
//! Arrays whose elements are contiguous in memory (any standard or Fortran layout) go
//! through the vectorized engine in memory order. Strided views, such as a column of a
//! row-major matrix or a slice with a step, have no aligned runs to exploit and are
//! visited element by element in logical order.

use log::trace;
use ndarray::{ArrayBase, Data, DataMut, Dimension};

use crate::{
    dispatch::Element,
    ops::{Inspect, Transform},
    traverse::{for_each, for_each_mut},
};

/// Runs a read-only operation over every element of `array`.
///
/// ```rust
/// use ndarray::array;
/// use simdwalk::{adapters::for_each_array, ops::Sum};
///
/// let m = array![[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]];
/// assert_eq!(for_each_array(&m, Sum::<f64>::default()).value(), 21.0);
/// assert_eq!(for_each_array(&m.column(1), Sum::<f64>::default()).value(), 7.0);
/// ```
pub fn for_each_array<A, S, D, F>(array: &ArrayBase<S, D>, f: F) -> F
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
    F: Inspect<A>,
{
    match array.as_slice_memory_order() {
        Some(slice) => for_each(slice, f),
        None => {
            trace!("strided array of {} elements: sequential visit", array.len());
            let mut f = f;
            for value in array.iter() {
                f.inspect_one(value);
            }
            f
        }
    }
}

/// Runs a read-modify-write operation over every element of `array`.
///
/// ```rust
/// use ndarray::Array2;
/// use simdwalk::{adapters::for_each_array_mut, ops::Scale};
///
/// let mut m = Array2::from_elem((3, 5), 2i32);
/// for_each_array_mut(&mut m, Scale::new(4i32));
/// assert!(m.iter().all(|&x| x == 8));
/// ```
pub fn for_each_array_mut<A, S, D, F>(array: &mut ArrayBase<S, D>, f: F) -> F
where
    A: Element,
    S: DataMut<Elem = A>,
    D: Dimension,
    F: Transform<A>,
{
    if let Some(slice) = array.as_slice_memory_order_mut() {
        return for_each_mut(slice, f);
    }

    trace!("strided array of {} elements: sequential visit", array.len());
    let mut f = f;
    for value in array.iter_mut() {
        f.transform_one(value);
    }
    f
}
