//! Implicit index spans for balanced binary splitting
//!
//! Node ranges are never stored in the tree. Every traversal starts from
//! the full span `[0, size - 1]` and recomputes child spans by halving:
//!   Left child:  [lo, mid]
//!   Right child: [mid + 1, hi]
//! where `mid = lo + (hi - lo) / 2`.

mod path;
mod span;

pub use path::{Direction, PathToken};
pub use span::Span;

/// Depth of the balanced tree built over `size` elements: ⌈log2(size)⌉
///
/// A point update allocates at most `height(size) + 1` nodes.
pub fn height(size: usize) -> usize {
    if size <= 1 {
        return 0;
    }
    (usize::BITS - (size - 1).leading_zeros()) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_matches_ceil_log2() {
        assert_eq!(height(1), 0);
        assert_eq!(height(2), 1);
        assert_eq!(height(3), 2);
        assert_eq!(height(4), 2);
        assert_eq!(height(6), 3);
        assert_eq!(height(1024), 10);
        assert_eq!(height(1025), 11);
    }

    #[test]
    fn test_height_bounds_span_depth() {
        for size in 1..300 {
            let root = Span::root(size);
            assert_eq!(
                root.depth_to_leaf(),
                height(size),
                "leftmost depth for size {}",
                size
            );
        }
    }
}
