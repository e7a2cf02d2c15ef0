//! Aggregation algebra
//!
//! The tree performs no arithmetic of its own. Every aggregate is produced
//! by a [`Monoid`]: an associative `combine` with a neutral `identity`.
//! - Associativity lets any balanced split produce the same fold
//! - The identity lets disjoint sub-ranges drop out of a query
//! - Commutativity is NOT assumed: operands are always combined left to right

mod combiner;
mod monoid;

pub use combiner::{Bounded, FnMonoid, Max, Min, Sum};
pub use monoid::{fold, Monoid};
