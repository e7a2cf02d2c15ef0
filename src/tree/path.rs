//! Root-to-leaf paths
//!
//! A point update touches exactly the spans on one root-to-leaf path.
//! The path is fully described by one direction per level; endpoints are
//! recomputed from the root span on demand.

use super::Span;

/// Which child the path descends into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Lower half `[lo, mid]`
    Left,

    /// Upper half `[mid + 1, hi]`
    Right,
}

/// Directions from the root down to the leaf holding one index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathToken {
    directions: Vec<Direction>,
}

impl PathToken {
    /// Path from `root` to the leaf for `index`, or `None` when `index`
    /// lies outside `root`
    pub fn to_index(root: Span, index: usize) -> Option<Self> {
        if !root.contains(index) {
            return None;
        }

        let mut directions = Vec::new();
        let mut span = root;
        while !span.is_leaf() {
            let (left, right) = span.children();
            if index <= left.hi {
                directions.push(Direction::Left);
                span = left;
            } else {
                directions.push(Direction::Right);
                span = right;
            }
        }

        Some(Self { directions })
    }

    /// Directions, root first
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Number of edges on the path
    pub fn depth(&self) -> usize {
        self.directions.len()
    }

    /// Spans visited along the path, root first and leaf last
    pub fn spans(&self, root: Span) -> Vec<Span> {
        let mut spans = Vec::with_capacity(self.directions.len() + 1);
        let mut span = root;
        spans.push(span);

        for direction in &self.directions {
            let (left, right) = span.children();
            span = match direction {
                Direction::Left => left,
                Direction::Right => right,
            };
            spans.push(span);
        }

        spans
    }

    /// Recompute the leaf span reached by the path
    pub fn leaf(&self, root: Span) -> Span {
        self.spans(root).last().copied().unwrap_or(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_reaches_leaf() {
        let root = Span::root(6);
        for index in 0..6 {
            let path = PathToken::to_index(root, index).expect("index in range");
            assert_eq!(path.leaf(root), Span::new(index, index));
        }
    }

    #[test]
    fn test_path_directions() {
        let root = Span::root(6);
        let path = PathToken::to_index(root, 4).expect("index in range");
        // [0,5] -> [3,5] -> [3,4] -> [4]
        assert_eq!(
            path.directions(),
            &[Direction::Right, Direction::Left, Direction::Right]
        );
        assert_eq!(
            path.spans(root),
            vec![Span::new(0, 5), Span::new(3, 5), Span::new(3, 4), Span::new(4, 4)]
        );
    }

    #[test]
    fn test_out_of_range_has_no_path() {
        assert!(PathToken::to_index(Span::root(4), 4).is_none());
    }

    #[test]
    fn test_single_element_path_is_empty() {
        let path = PathToken::to_index(Span::root(1), 0).expect("index in range");
        assert_eq!(path.depth(), 0);
    }
}
