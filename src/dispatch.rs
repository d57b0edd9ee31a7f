//! Strategy selection.
//!
//! Two independent, compile-time choices decide how a traversal runs:
//!
//! 1. The element type. [`Element`] impls for primitive numbers route through the
//!    vectorized three-phase walk; every other `Element` keeps the default
//!    element-by-element visit.
//! 2. The operation's access mode. [`ReadOnly`] wraps an [`Inspect`] operation and never
//!    stores; [`ReadWrite`] wraps a [`Transform`] and stores every window back.
//!
//! Both resolve during monomorphization, so the selected path carries no runtime
//! branching beyond the alignment split.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use num::complex::Complex;

use crate::{
    alignment::Plan,
    engine,
    ops::{Inspect, Transform},
    simd::{native_lanes, Vector, Window},
};

/// How an operation accesses the elements it visits.
pub trait Access<T> {
    /// Whether windows are stored back after the operation ran.
    const STORES: bool;

    /// Applies the operation to a loaded window.
    fn apply<W>(&mut self, window: &mut W)
    where
        T: Copy,
        W: Window<T>;

    /// Applies the operation to the element at `ptr`, without a window.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live, initialised element. It must be valid for writes
    /// when `STORES` is true.
    unsafe fn apply_in_place(&mut self, ptr: *mut T);
}

/// Read-only access: the wrapped [`Inspect`] operation never causes a store.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReadOnly<F>(pub F);

/// Read-modify-write access: every window is stored back after the wrapped
/// [`Transform`] operation ran.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReadWrite<F>(pub F);

impl<F> ReadOnly<F> {
    /// Returns the wrapped operation.
    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<F> ReadWrite<F> {
    /// Returns the wrapped operation.
    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<T, F: Inspect<T>> Access<T> for ReadOnly<F> {
    const STORES: bool = false;

    #[inline(always)]
    fn apply<W>(&mut self, window: &mut W)
    where
        T: Copy,
        W: Window<T>,
    {
        self.0.inspect(&*window);
    }

    #[inline(always)]
    unsafe fn apply_in_place(&mut self, ptr: *mut T) {
        self.0.inspect_one(&*ptr);
    }
}

impl<T, F: Transform<T>> Access<T> for ReadWrite<F> {
    const STORES: bool = true;

    #[inline(always)]
    fn apply<W>(&mut self, window: &mut W)
    where
        T: Copy,
        W: Window<T>,
    {
        self.0.transform(window);
    }

    #[inline(always)]
    unsafe fn apply_in_place(&mut self, ptr: *mut T) {
        self.0.transform_one(&mut *ptr);
    }
}

mod sealed {
    /// How an element type is walked.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Walk {
        Sequential,
        Vectorized,
    }

    /// Witness passed to [`Element::walk`](super::Element::walk). Only this crate can
    /// name or build it, so downstream impls cannot replace the walk.
    #[derive(Clone, Copy, Debug)]
    pub struct Token(());

    impl Token {
        pub(crate) const fn new() -> Self {
            Token(())
        }
    }
}

pub(crate) use sealed::Token;
use sealed::Walk;

/// An element type the traversal engine can walk.
///
/// Primitive numbers, `bool` and `char` take the vectorized walk. Every other std type
/// is implemented here as opaque and visited one element at a time. Crate-local types
/// opt in the same way with an empty impl:
///
/// ```rust
/// use simdwalk::dispatch::Element;
///
/// struct Particle {
///     name: String,
///     mass: f64,
/// }
///
/// impl Element for Particle {}
///
/// let particles = vec![
///     Particle { name: "a".into(), mass: 1.5 },
///     Particle { name: "b".into(), mass: 2.5 },
/// ];
///
/// let mut total = 0.0;
/// let _ = simdwalk::for_each(&particles, |p: &Particle| total += p.mass);
/// assert_eq!(total, 4.0);
/// ```
///
/// The classification and the walk are sealed: an impl outside this crate cannot
/// override either, so [`Strategy::of`] always describes the walk that runs.
///
/// ```compile_fail
/// use simdwalk::{dispatch::Element, Access, Plan};
///
/// struct Particle;
///
/// impl Element for Particle {
///     unsafe fn walk<A: Access<Self>>(first: *mut Self, len: usize, op: &mut A) -> Plan {
///         unimplemented!()
///     }
/// }
/// ```
pub trait Element: Sized {
    #[doc(hidden)]
    const WALK: Walk = Walk::Sequential;

    /// Walks `len` elements starting at `first`, returning the phase split it used.
    ///
    /// The default is a plain sequential visit through [`Access::apply_in_place`].
    ///
    /// # Safety
    ///
    /// `first` must be valid for reads of `len` consecutive elements, and for writes
    /// when `A::STORES` is true.
    #[doc(hidden)]
    #[inline(always)]
    unsafe fn walk<A: Access<Self>>(first: *mut Self, len: usize, op: &mut A, _: Token) -> Plan {
        engine::sequential(first, len, op)
    }
}

/// Whether elements of type `T` are grouped into vector windows.
///
/// ```rust
/// use simdwalk::dispatch::is_vectorizable;
///
/// assert!(is_vectorizable::<f32>());
/// assert!(!is_vectorizable::<(f32, f32)>());
/// ```
pub const fn is_vectorizable<T: Element>() -> bool {
    matches!(T::WALK, Walk::Vectorized)
}

/// An element type with a native vector window.
pub trait Vectorizable: Element + Copy {
    /// The widest window available for this type on the build target.
    type Vector: Window<Self>;
}

macro_rules! impl_vectorizable {
    ($($t:ty),* $(,)?) => {$(
        impl Element for $t {
            const WALK: Walk = Walk::Vectorized;

            #[inline(always)]
            unsafe fn walk<A: Access<Self>>(
                first: *mut Self,
                len: usize,
                op: &mut A,
                _: Token,
            ) -> Plan {
                engine::vectorized::<$t, <$t as Vectorizable>::Vector, A>(first, len, op)
            }
        }

        impl Vectorizable for $t {
            type Vector = Vector<$t, { native_lanes::<$t>() }>;
        }
    )*};
}

impl_vectorizable!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, bool, char);

macro_rules! impl_opaque {
    ($($t:ty),* $(,)?) => {$(
        impl Element for $t {}
    )*};
}

impl_opaque!(i128, u128, String, PathBuf, OsString, Duration, Ordering);

impl<T: ?Sized> Element for &T {}
impl<T: ?Sized> Element for &mut T {}
impl<T: ?Sized> Element for Box<T> {}
impl<T: ?Sized> Element for Rc<T> {}
impl<T: ?Sized> Element for Arc<T> {}
impl<B: ToOwned + ?Sized> Element for Cow<'_, B> {}
impl<T> Element for Cell<T> {}
impl<T> Element for RefCell<T> {}
impl<T> Element for Vec<T> {}
impl<T> Element for VecDeque<T> {}
impl<T> Element for BTreeSet<T> {}
impl<K, V> Element for BTreeMap<K, V> {}
impl<T, S> Element for HashSet<T, S> {}
impl<K, V, S> Element for HashMap<K, V, S> {}
impl<T> Element for Option<T> {}
impl<T, E> Element for Result<T, E> {}
impl<T, const N: usize> Element for [T; N] {}
impl<T> Element for Complex<T> {}

macro_rules! impl_opaque_tuple {
    ($(($($name:ident),*)),* $(,)?) => {$(
        impl<$($name),*> Element for ($($name,)*) {}
    )*};
}

impl_opaque_tuple!(
    (),
    (A),
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
    (A, B, C, D, E, F, G),
    (A, B, C, D, E, F, G, H),
    (A, B, C, D, E, F, G, H, I),
    (A, B, C, D, E, F, G, H, I, J),
    (A, B, C, D, E, F, G, H, I, J, K),
    (A, B, C, D, E, F, G, H, I, J, K, L),
);

/// The path a traversal takes, derived from the element type and access mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Opaque elements, read-only operation.
    SequentialInspect,
    /// Opaque elements, read-modify-write operation.
    SequentialTransform,
    /// Vector windows, no stores.
    VectorizedInspect,
    /// Vector windows, each stored back.
    VectorizedTransform,
}

impl Strategy {
    /// Strategy for an element classification and access mode.
    pub const fn select(vectorizable: bool, stores: bool) -> Self {
        match (vectorizable, stores) {
            (false, false) => Strategy::SequentialInspect,
            (false, true) => Strategy::SequentialTransform,
            (true, false) => Strategy::VectorizedInspect,
            (true, true) => Strategy::VectorizedTransform,
        }
    }

    /// Strategy a traversal of `T` elements with access `A` uses.
    pub const fn of<T: Element, A: Access<T>>() -> Self {
        Self::select(is_vectorizable::<T>(), A::STORES)
    }

    /// Whether bulk windows are used.
    pub const fn is_vectorized(self) -> bool {
        matches!(
            self,
            Strategy::VectorizedInspect | Strategy::VectorizedTransform
        )
    }

    /// Whether visited elements are written back.
    pub const fn stores(self) -> bool {
        matches!(
            self,
            Strategy::SequentialTransform | Strategy::VectorizedTransform
        )
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::SequentialInspect => "sequential/inspect",
            Strategy::SequentialTransform => "sequential/transform",
            Strategy::VectorizedInspect => "vectorized/inspect",
            Strategy::VectorizedTransform => "vectorized/transform",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::Sum;

    type Noop = fn(&f32);
    type Bump = fn(&mut f32);

    #[test]
    fn test_strategy_for_numeric_types() {
        assert_eq!(
            Strategy::of::<f32, ReadOnly<Noop>>(),
            Strategy::VectorizedInspect
        );
        assert_eq!(
            Strategy::of::<f32, ReadWrite<Bump>>(),
            Strategy::VectorizedTransform
        );
        assert_eq!(
            Strategy::of::<u64, ReadOnly<Sum<u64>>>(),
            Strategy::VectorizedInspect
        );
    }

    #[test]
    fn test_strategy_for_opaque_types() {
        type Inspector = fn(&String);
        type Mutator = fn(&mut String);
        assert_eq!(
            Strategy::of::<String, ReadOnly<Inspector>>(),
            Strategy::SequentialInspect
        );
        assert_eq!(
            Strategy::of::<String, ReadWrite<Mutator>>(),
            Strategy::SequentialTransform
        );
    }

    #[test]
    fn test_strategy_flags() {
        assert!(Strategy::VectorizedTransform.is_vectorized());
        assert!(Strategy::VectorizedTransform.stores());
        assert!(!Strategy::SequentialInspect.is_vectorized());
        assert!(!Strategy::VectorizedInspect.stores());
        assert_eq!(Strategy::SequentialTransform.to_string(), "sequential/transform");
    }

    #[test]
    fn test_native_vector_fills_register() {
        use crate::simd::REGISTER_BYTES;
        assert_eq!(<<f32 as Vectorizable>::Vector as Window<f32>>::ALIGNMENT, REGISTER_BYTES);
        assert_eq!(<<u8 as Vectorizable>::Vector as Window<u8>>::LANES, REGISTER_BYTES);
    }

    #[test]
    fn test_read_only_never_mutates_window() {
        let mut op = ReadOnly(|x: &i32| assert!(*x > 0));
        let mut window = Vector::from_array([1, 2, 3, 4]);
        op.apply(&mut window);
        assert_eq!(window.to_array(), [1, 2, 3, 4]);
    }
}
