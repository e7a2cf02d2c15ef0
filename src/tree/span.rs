//! Index span covered by a tree position
//!
//! Span = [lo, hi] ⊆ [0, size - 1], split at m = lo + (hi - lo) / 2
//! (odd counts put the extra element in the left half).

use std::fmt;

/// Inclusive index range implied by a node's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Lowest covered index (inclusive)
    pub lo: usize,

    /// Highest covered index (inclusive)
    pub hi: usize,
}

impl Span {
    /// Span of the root for an array of `size` elements
    ///
    /// `size` must be non-zero; callers validate before building.
    pub fn root(size: usize) -> Self {
        debug_assert!(size > 0, "root span over an empty array");
        Self { lo: 0, hi: size - 1 }
    }

    /// Create span `[lo, hi]`
    pub fn new(lo: usize, hi: usize) -> Self {
        debug_assert!(lo <= hi, "inverted span [{}, {}]", lo, hi);
        Self { lo, hi }
    }

    /// Singleton spans are leaves
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.lo == self.hi
    }

    /// Number of covered indices
    #[inline]
    pub fn len(&self) -> usize {
        self.hi - self.lo + 1
    }

    /// Spans are never empty; provided for API symmetry with `len`
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Overflow-safe midpoint
    #[inline]
    pub fn midpoint(&self) -> usize {
        self.lo + (self.hi - self.lo) / 2
    }

    /// Split into `([lo, mid], [mid + 1, hi])`
    pub fn children(&self) -> (Span, Span) {
        debug_assert!(!self.is_leaf(), "Leaf has no children");

        let mid = self.midpoint();
        (
            Span { lo: self.lo, hi: mid },
            Span {
                lo: mid + 1,
                hi: self.hi,
            },
        )
    }

    /// Whether `index` lies inside the span
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.lo <= index && index <= self.hi
    }

    /// No index in common with `[left, right]`
    #[inline]
    pub fn is_disjoint(&self, left: usize, right: usize) -> bool {
        right < self.lo || left > self.hi
    }

    /// Entirely inside `[left, right]`
    #[inline]
    pub fn is_within(&self, left: usize, right: usize) -> bool {
        left <= self.lo && self.hi <= right
    }

    /// Depth along the leftmost path, which is the deepest one
    pub fn depth_to_leaf(&self) -> usize {
        let mut span = *self;
        let mut depth = 0;

        while !span.is_leaf() {
            span = span.children().0;
            depth += 1;
        }

        depth
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "[{}]", self.lo)
        } else {
            write!(f, "[{}, {}]", self.lo, self.hi)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_split_biases_left() {
        let span = Span::root(6);
        let (left, right) = span.children();

        assert_eq!(left, Span::new(0, 2));
        assert_eq!(right, Span::new(3, 5));

        let (ll, lr) = left.children();
        assert_eq!(ll, Span::new(0, 1));
        assert_eq!(lr, Span::new(2, 2));
        assert!(lr.is_leaf());
    }

    #[test]
    fn test_midpoint_does_not_overflow() {
        let span = Span::new(usize::MAX - 3, usize::MAX - 1);
        assert_eq!(span.midpoint(), usize::MAX - 2);
    }

    #[test]
    fn test_overlap_predicates() {
        let span = Span::new(3, 5);
        assert!(span.is_disjoint(0, 2));
        assert!(span.is_disjoint(6, 9));
        assert!(!span.is_disjoint(5, 9));
        assert!(span.is_within(0, 5));
        assert!(!span.is_within(4, 9));
        assert!(span.contains(4));
        assert!(!span.contains(6));
    }

    #[test]
    fn test_geometric_shrinkage() {
        let mut span = Span::root(100);
        while !span.is_leaf() {
            let (left, right) = span.children();
            let ceil_half = (span.len() + 1) / 2;
            assert!(left.len() <= ceil_half);
            assert!(right.len() <= ceil_half);
            assert_eq!(left.len() + right.len(), span.len());
            span = right;
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Span::new(2, 2).to_string(), "[2]");
        assert_eq!(Span::new(0, 5).to_string(), "[0, 5]");
    }
}
