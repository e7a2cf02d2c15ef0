//! The associative-operation-with-identity capability

/// Associative binary operation with a neutral element
///
/// Implementations must uphold, for all reachable values `a`, `b`, `c`:
/// - `combine(combine(a, b), c) == combine(a, combine(b, c))`
/// - `combine(identity(), a) == a == combine(a, identity())`
///
/// `combine` is always invoked with the lower-index operand on the left.
pub trait Monoid {
    /// Element type being aggregated
    type Value: Clone;

    /// Neutral element
    fn identity(&self) -> Self::Value;

    /// Combine two adjacent aggregates, `left` covering the lower indices
    fn combine(&self, left: &Self::Value, right: &Self::Value) -> Self::Value;
}

impl<M: Monoid + ?Sized> Monoid for &M {
    type Value = M::Value;

    fn identity(&self) -> Self::Value {
        (**self).identity()
    }

    fn combine(&self, left: &Self::Value, right: &Self::Value) -> Self::Value {
        (**self).combine(left, right)
    }
}

/// Left-to-right fold of `values` under `monoid`
///
/// Reference semantics for a range query; linear time.
pub fn fold<'a, M, I>(monoid: &M, values: I) -> M::Value
where
    M: Monoid,
    M::Value: 'a,
    I: IntoIterator<Item = &'a M::Value>,
{
    values
        .into_iter()
        .fold(monoid.identity(), |acc, value| monoid.combine(&acc, value))
}
