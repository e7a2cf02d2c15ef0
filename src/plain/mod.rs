//! Single-version segment tree
//!
//! Same build and query as the persistent tree, but an update mutates the
//! leaf in place and recomputes its ancestors on the way back up. There is
//! no version table: the previous contents are gone after an update.

use std::fmt;

use tracing::debug;

use crate::{
    algebra::{FnMonoid, Monoid},
    tree::{Direction, PathToken, Span},
    SegmentTreeError,
};

/// Exclusively owned node
#[derive(Debug)]
struct PlainNode<T> {
    value: T,
    children: Option<Box<(PlainNode<T>, PlainNode<T>)>>,
}

/// In-place interval-aggregation tree
pub struct SegmentTree<M: Monoid> {
    monoid: M,
    size: usize,
    root: PlainNode<M::Value>,
}

impl<M: Monoid> SegmentTree<M> {
    /// Build over `values`; fails with `InvalidSize` when empty
    pub fn new(values: &[M::Value], monoid: M) -> Result<Self, SegmentTreeError> {
        if values.is_empty() {
            return Err(SegmentTreeError::InvalidSize);
        }

        let size = values.len();
        let root = Self::build(&monoid, values, Span::root(size));
        debug!(size, "built in-place tree");

        Ok(Self { monoid, size, root })
    }

    fn build(monoid: &M, values: &[M::Value], span: Span) -> PlainNode<M::Value> {
        if span.is_leaf() {
            return PlainNode {
                value: values[span.lo].clone(),
                children: None,
            };
        }

        let (left_span, right_span) = span.children();
        let left = Self::build(monoid, values, left_span);
        let right = Self::build(monoid, values, right_span);

        PlainNode {
            value: monoid.combine(&left.value, &right.value),
            children: Some(Box::new((left, right))),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.size
    }

    /// Always false: empty arrays are rejected at construction
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The aggregation monoid
    pub fn monoid(&self) -> &M {
        &self.monoid
    }

    /// Aggregate over the whole array
    pub fn total(&self) -> &M::Value {
        &self.root.value
    }

    /// Fold of the monoid over `[left, right]`
    pub fn query(&self, left: usize, right: usize) -> Result<M::Value, SegmentTreeError> {
        if left > right || right >= self.size {
            return Err(SegmentTreeError::InvalidRange {
                left,
                right,
                size: self.size,
            });
        }

        Ok(Self::query_node(
            &self.monoid,
            &self.root,
            Span::root(self.size),
            left,
            right,
        ))
    }

    fn query_node(
        monoid: &M,
        node: &PlainNode<M::Value>,
        span: Span,
        left: usize,
        right: usize,
    ) -> M::Value {
        if span.is_disjoint(left, right) {
            return monoid.identity();
        }

        if span.is_within(left, right) {
            return node.value.clone();
        }

        let Some(children) = node.children.as_deref() else {
            return node.value.clone();
        };

        let (left_span, right_span) = span.children();
        let lower = Self::query_node(monoid, &children.0, left_span, left, right);
        let upper = Self::query_node(monoid, &children.1, right_span, left, right);
        monoid.combine(&lower, &upper)
    }

    /// Element at `index`
    pub fn get(&self, index: usize) -> Result<M::Value, SegmentTreeError> {
        let path = PathToken::to_index(Span::root(self.size), index).ok_or(
            SegmentTreeError::InvalidIndex {
                index,
                size: self.size,
            },
        )?;

        let mut node = &self.root;
        for direction in path.directions() {
            let Some(children) = node.children.as_deref() else {
                break;
            };
            node = match direction {
                Direction::Left => &children.0,
                Direction::Right => &children.1,
            };
        }

        Ok(node.value.clone())
    }

    /// Current contents in index order
    pub fn values(&self) -> Vec<M::Value> {
        let mut out = Vec::with_capacity(self.size);
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node.children.as_deref() {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => out.push(node.value.clone()),
            }
        }
        out
    }

    /// Overwrite `index` with `value`
    pub fn update(&mut self, index: usize, value: M::Value) -> Result<(), SegmentTreeError> {
        self.check_index(index)?;

        let modified = Self::update_node(
            &self.monoid,
            &mut self.root,
            Span::root(self.size),
            index,
            value,
        );
        debug_assert!(modified, "validated index must reach a leaf");

        Ok(())
    }

    /// Returns whether a leaf below `node` changed, so the caller recomputes
    fn update_node(
        monoid: &M,
        node: &mut PlainNode<M::Value>,
        span: Span,
        index: usize,
        value: M::Value,
    ) -> bool {
        if !span.contains(index) {
            return false;
        }

        let Some(children) = node.children.as_deref_mut() else {
            node.value = value;
            return true;
        };

        let (left_span, right_span) = span.children();
        let modified = if index <= left_span.hi {
            Self::update_node(monoid, &mut children.0, left_span, index, value)
        } else {
            Self::update_node(monoid, &mut children.1, right_span, index, value)
        };

        if modified {
            node.value = monoid.combine(&children.0.value, &children.1.value);
        }
        modified
    }

    fn check_index(&self, index: usize) -> Result<(), SegmentTreeError> {
        if index >= self.size {
            return Err(SegmentTreeError::InvalidIndex {
                index,
                size: self.size,
            });
        }
        Ok(())
    }
}

impl<T, F> SegmentTree<FnMonoid<T, F>>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Build from an arbitrary associative callable and its neutral element
    pub fn from_fn(values: &[T], op: F, identity: T) -> Result<Self, SegmentTreeError> {
        Self::new(values, FnMonoid::new(op, identity))
    }
}

impl<M> fmt::Debug for SegmentTree<M>
where
    M: Monoid + fmt::Debug,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("monoid", &self.monoid)
            .field("size", &self.size)
            .field("total", &self.root.value)
            .finish()
    }
}
