//! Stock monoids
//!
//! `Sum`, `Min` and `Max` cover the common range-query workloads;
//! `FnMonoid` adapts any callable plus a caller-chosen neutral element.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Add;

use super::Monoid;

/// Types with a smallest and a largest value
///
/// These are the identities of `Max` and `Min` respectively.
pub trait Bounded {
    /// Smallest representable value
    fn min_value() -> Self;
    /// Largest representable value
    fn max_value() -> Self;
}

macro_rules! impl_bounded_int {
    ($($t:ty),*) => {
        $(
            impl Bounded for $t {
                fn min_value() -> Self {
                    <$t>::MIN
                }

                fn max_value() -> Self {
                    <$t>::MAX
                }
            }
        )*
    };
}

impl_bounded_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_bounded_float {
    ($($t:ty),*) => {
        $(
            impl Bounded for $t {
                fn min_value() -> Self {
                    <$t>::NEG_INFINITY
                }

                fn max_value() -> Self {
                    <$t>::INFINITY
                }
            }
        )*
    };
}

impl_bounded_float!(f32, f64);

/// Addition, identity `T::default()`
pub struct Sum<T>(PhantomData<T>);

/// Minimum, identity `T::max_value()`
pub struct Min<T>(PhantomData<T>);

/// Maximum, identity `T::min_value()`
pub struct Max<T>(PhantomData<T>);

// Manual impls so that `T` needs no extra bounds.
macro_rules! impl_marker_traits {
    ($($name:ident),*) => {
        $(
            impl<T> $name<T> {
                /// Create the monoid
                pub fn new() -> Self {
                    Self(PhantomData)
                }
            }

            impl<T> Default for $name<T> {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl<T> Clone for $name<T> {
                fn clone(&self) -> Self {
                    Self::new()
                }
            }

            impl<T> Copy for $name<T> {}

            impl<T> fmt::Debug for $name<T> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($name))
                }
            }
        )*
    };
}

impl_marker_traits!(Sum, Min, Max);

impl<T> Monoid for Sum<T>
where
    T: Clone + Default + Add<Output = T>,
{
    type Value = T;

    fn identity(&self) -> T {
        T::default()
    }

    fn combine(&self, left: &T, right: &T) -> T {
        left.clone() + right.clone()
    }
}

impl<T> Monoid for Min<T>
where
    T: Clone + PartialOrd + Bounded,
{
    type Value = T;

    fn identity(&self) -> T {
        T::max_value()
    }

    fn combine(&self, left: &T, right: &T) -> T {
        if right < left {
            right.clone()
        } else {
            left.clone()
        }
    }
}

impl<T> Monoid for Max<T>
where
    T: Clone + PartialOrd + Bounded,
{
    type Value = T;

    fn identity(&self) -> T {
        T::min_value()
    }

    fn combine(&self, left: &T, right: &T) -> T {
        if right > left {
            right.clone()
        } else {
            left.clone()
        }
    }
}

/// Monoid built from a callable and an explicit neutral element
///
/// The caller is responsible for the monoid laws; they are not checked.
#[derive(Clone)]
pub struct FnMonoid<T, F> {
    op: F,
    identity: T,
}

impl<T, F> FnMonoid<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Wrap `op` with neutral element `identity`
    pub fn new(op: F, identity: T) -> Self {
        Self { op, identity }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for FnMonoid<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMonoid")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<T, F> Monoid for FnMonoid<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    type Value = T;

    fn identity(&self) -> T {
        self.identity.clone()
    }

    fn combine(&self, left: &T, right: &T) -> T {
        (self.op)(left, right)
    }
}
