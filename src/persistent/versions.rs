//! Append-only version table
//!
//! Entry k is the root of version k. Entries are never removed, so a
//! version index stays valid for the lifetime of the table.

use std::rc::Rc;

use super::Node;

/// Ordered version roots plus the current-version cursor
#[derive(Debug)]
pub struct VersionTable<T> {
    roots: Vec<Rc<Node<T>>>,
    current: usize,
}

impl<T> VersionTable<T> {
    /// Table whose only entry is version 0
    pub fn new(initial: Rc<Node<T>>) -> Self {
        Self {
            roots: vec![initial],
            current: 0,
        }
    }

    /// Append a root; it becomes current. Returns its version index.
    pub fn push(&mut self, root: Rc<Node<T>>) -> usize {
        self.roots.push(root);
        self.current = self.roots.len() - 1;
        self.current
    }

    /// Root of `version`
    pub fn get(&self, version: usize) -> Option<&Rc<Node<T>>> {
        self.roots.get(version)
    }

    /// Root of the current version
    pub fn current_root(&self) -> &Rc<Node<T>> {
        &self.roots[self.current]
    }

    /// Current-version cursor
    pub fn current(&self) -> usize {
        self.current
    }

    /// Most recently created version
    pub fn latest(&self) -> usize {
        self.roots.len() - 1
    }

    /// Number of versions (never zero)
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Always false: version 0 exists from construction
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Whether `version` exists
    pub fn contains(&self, version: usize) -> bool {
        version < self.roots.len()
    }

    /// Move the cursor; returns false (cursor unchanged) for a missing version
    pub fn set_current(&mut self, version: usize) -> bool {
        if !self.contains(version) {
            return false;
        }
        self.current = version;
        true
    }

    /// All roots in version order
    pub fn roots(&self) -> impl Iterator<Item = &Rc<Node<T>>> {
        self.roots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_moves_cursor() {
        let mut table = VersionTable::new(Rc::new(Node::leaf(1)));
        assert_eq!(table.current(), 0);
        assert_eq!(table.push(Rc::new(Node::leaf(2))), 1);
        assert_eq!(table.push(Rc::new(Node::leaf(3))), 2);
        assert_eq!(table.current(), 2);
        assert_eq!(table.latest(), 2);
        assert_eq!(*table.current_root().value(), 3);
    }

    #[test]
    fn test_set_current() {
        let mut table = VersionTable::new(Rc::new(Node::leaf(1)));
        table.push(Rc::new(Node::leaf(2)));

        assert!(table.set_current(0));
        assert_eq!(*table.current_root().value(), 1);

        assert!(!table.set_current(2));
        assert_eq!(table.current(), 0);

        // Branching: appending from an older cursor still lands at the end
        assert_eq!(table.push(Rc::new(Node::leaf(9))), 2);
        assert_eq!(table.len(), 3);
    }
}
