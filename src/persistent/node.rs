//! Immutable shared tree nodes
//!
//! Node = aggregate over the span implied by its position.
//! Children are reference-counted: one physical subtree may be owned by
//! many version roots, and is released when the last of them is dropped.

use std::rc::Rc;

/// Immutable tree node
///
/// Internal nodes always hold `value == combine(left.value, right.value)`.
#[derive(Debug)]
pub struct Node<T> {
    value: T,
    children: Option<(Rc<Node<T>>, Rc<Node<T>>)>,
}

impl<T> Node<T> {
    /// Leaf holding one array element
    pub(crate) fn leaf(value: T) -> Self {
        Self {
            value,
            children: None,
        }
    }

    /// Internal node over two (possibly shared) subtrees
    pub(crate) fn internal(value: T, left: Rc<Node<T>>, right: Rc<Node<T>>) -> Self {
        Self {
            value,
            children: Some((left, right)),
        }
    }

    /// Aggregate over the node's span
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Leaves have no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Both children, lower half first
    #[inline]
    pub fn children(&self) -> Option<(&Rc<Node<T>>, &Rc<Node<T>>)> {
        self.children.as_ref().map(|(left, right)| (left, right))
    }

    /// Lower-half child
    pub fn left(&self) -> Option<&Rc<Node<T>>> {
        self.children.as_ref().map(|(left, _)| left)
    }

    /// Upper-half child
    pub fn right(&self) -> Option<&Rc<Node<T>>> {
        self.children.as_ref().map(|(_, right)| right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_and_internal() {
        let left = Rc::new(Node::leaf(2));
        let right = Rc::new(Node::leaf(5));
        let parent = Node::internal(7, Rc::clone(&left), Rc::clone(&right));

        assert!(left.is_leaf());
        assert!(!parent.is_leaf());
        assert_eq!(*parent.value(), 7);
        assert!(Rc::ptr_eq(parent.left().expect("internal"), &left));
        assert!(Rc::ptr_eq(parent.right().expect("internal"), &right));
        assert_eq!(Rc::strong_count(&left), 2);
    }
}
