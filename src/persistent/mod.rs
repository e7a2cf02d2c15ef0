//! Persistent segment tree
//!
//! Every version is an immutable snapshot:
//! - Build: O(size) nodes, version 0
//! - Query: O(log size), read-only, against any version
//! - Update: copies the O(log size) nodes on one root-to-leaf path and
//!   shares every other subtree with the version it was derived from
//!
//! Nodes are reference-counted, so dropping the tree frees each physically
//! distinct node exactly once regardless of how many versions share it.

mod node;
mod versions;

pub use node::Node;
pub use versions::VersionTable;

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::{
    algebra::{FnMonoid, Monoid},
    space::{AllocationProfile, AllocationTracker},
    tree::{self, Direction, PathToken, Span},
    SegmentTreeError, TreeConfig, VersionPolicy, VersionSelection,
};

/// Versioned interval-aggregation tree
pub struct PersistentSegmentTree<M: Monoid> {
    monoid: M,
    size: usize,
    versions: VersionTable<M::Value>,
    config: TreeConfig,
    tracker: AllocationTracker,
}

impl<M: Monoid> PersistentSegmentTree<M> {
    /// Build version 0 over `values` with the default configuration
    pub fn new(values: &[M::Value], monoid: M) -> Result<Self, SegmentTreeError> {
        Self::with_config(values, monoid, TreeConfig::default())
    }

    /// Build version 0 over `values`
    ///
    /// Fails with `InvalidSize` before allocating anything when `values`
    /// is empty.
    pub fn with_config(
        values: &[M::Value],
        monoid: M,
        config: TreeConfig,
    ) -> Result<Self, SegmentTreeError> {
        if values.is_empty() {
            return Err(SegmentTreeError::InvalidSize);
        }

        let size = values.len();
        let mut tracker = AllocationTracker::new(tree::height(size), config.profile_allocations);

        let root = Self::build(&monoid, values, Span::root(size), &mut tracker);
        let nodes = tracker.finish_version();
        debug!(size, nodes, "built version 0");

        Ok(Self {
            monoid,
            size,
            versions: VersionTable::new(root),
            config,
            tracker,
        })
    }

    /// Bottom-up build; children are complete before the parent combines them
    fn build(
        monoid: &M,
        values: &[M::Value],
        span: Span,
        tracker: &mut AllocationTracker,
    ) -> Rc<Node<M::Value>> {
        tracker.allocate_node();

        if span.is_leaf() {
            return Rc::new(Node::leaf(values[span.lo].clone()));
        }

        let (left_span, right_span) = span.children();
        let left = Self::build(monoid, values, left_span, tracker);
        let right = Self::build(monoid, values, right_span, tracker);
        let value = monoid.combine(left.value(), right.value());

        Rc::new(Node::internal(value, left, right))
    }

    /// Number of elements per version
    pub fn len(&self) -> usize {
        self.size
    }

    /// Always false: empty arrays are rejected at construction
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of versions created so far
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Version that `update` and `query_current` operate on
    pub fn current_version(&self) -> usize {
        self.versions.current()
    }

    /// Most recently created version
    pub fn latest_version(&self) -> usize {
        self.versions.latest()
    }

    /// Active configuration
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The aggregation monoid
    pub fn monoid(&self) -> &M {
        &self.monoid
    }

    /// Read-only version table
    pub fn versions(&self) -> &VersionTable<M::Value> {
        &self.versions
    }

    /// Root node of `version`
    pub fn root(&self, version: usize) -> Result<&Rc<Node<M::Value>>, SegmentTreeError> {
        self.versions
            .get(version)
            .ok_or(SegmentTreeError::InvalidVersion {
                version,
                count: self.versions.len(),
            })
    }

    /// Fold of the monoid over `[left, right]` at `version`
    ///
    /// Never allocates nodes or touches the version table.
    pub fn query(
        &self,
        version: usize,
        left: usize,
        right: usize,
    ) -> Result<M::Value, SegmentTreeError> {
        let root = self.root(version)?;
        self.check_range(left, right)?;

        Ok(Self::query_node(
            &self.monoid,
            root,
            Span::root(self.size),
            left,
            right,
        ))
    }

    /// `query` against the current version
    pub fn query_current(&self, left: usize, right: usize) -> Result<M::Value, SegmentTreeError> {
        self.query(self.versions.current(), left, right)
    }

    fn query_node(
        monoid: &M,
        node: &Node<M::Value>,
        span: Span,
        left: usize,
        right: usize,
    ) -> M::Value {
        if span.is_disjoint(left, right) {
            return monoid.identity();
        }

        if span.is_within(left, right) {
            return node.value().clone();
        }

        // A partially covered span always has two children
        let Some((left_child, right_child)) = node.children() else {
            return node.value().clone();
        };

        let (left_span, right_span) = span.children();
        let lower = Self::query_node(monoid, left_child, left_span, left, right);
        let upper = Self::query_node(monoid, right_child, right_span, left, right);
        monoid.combine(&lower, &upper)
    }

    /// Element at `index` in `version`
    pub fn get(&self, version: usize, index: usize) -> Result<M::Value, SegmentTreeError> {
        let mut node = self.root(version)?.as_ref();
        let path = self.path_to(index)?;

        for direction in path.directions() {
            let Some((left_child, right_child)) = node.children() else {
                break;
            };
            node = match direction {
                Direction::Left => left_child.as_ref(),
                Direction::Right => right_child.as_ref(),
            };
        }

        Ok(node.value().clone())
    }

    /// Logical array of `version`, read off the leaves in index order
    pub fn values(&self, version: usize) -> Result<Vec<M::Value>, SegmentTreeError> {
        let root = self.root(version)?;

        let mut out = Vec::with_capacity(self.size);
        let mut stack = vec![root.as_ref()];
        while let Some(node) = stack.pop() {
            match node.children() {
                Some((left_child, right_child)) => {
                    stack.push(right_child.as_ref());
                    stack.push(left_child.as_ref());
                }
                None => out.push(node.value().clone()),
            }
        }

        Ok(out)
    }

    /// Set `index` to `value`, deriving a new version from the current one
    ///
    /// The new version is appended, becomes current, and is returned.
    /// All earlier versions keep answering exactly as before.
    pub fn update(&mut self, index: usize, value: M::Value) -> Result<usize, SegmentTreeError> {
        self.check_index(index)?;

        let base = self.versions.current();
        let root = Self::path_copy(
            &self.monoid,
            self.versions.current_root(),
            Span::root(self.size),
            index,
            value,
            &mut self.tracker,
        );
        let nodes = self.tracker.finish_version();
        let version = self.versions.push(root);

        trace!(base, version, index, nodes, "path copy");
        if self.config.verbose {
            debug!(base, version, index, "created version");
        }

        Ok(version)
    }

    /// Copy the path to `index`; every sibling subtree is shared as-is
    fn path_copy(
        monoid: &M,
        node: &Rc<Node<M::Value>>,
        span: Span,
        index: usize,
        value: M::Value,
        tracker: &mut AllocationTracker,
    ) -> Rc<Node<M::Value>> {
        tracker.allocate_node();

        let Some((left_child, right_child)) = node.children() else {
            return Rc::new(Node::leaf(value));
        };

        let (left_span, right_span) = span.children();
        let (left, right) = if index <= left_span.hi {
            (
                Self::path_copy(monoid, left_child, left_span, index, value, tracker),
                Rc::clone(right_child),
            )
        } else {
            (
                Rc::clone(left_child),
                Self::path_copy(monoid, right_child, right_span, index, value, tracker),
            )
        };

        let combined = monoid.combine(left.value(), right.value());
        Rc::new(Node::internal(combined, left, right))
    }

    /// Make `version` current
    ///
    /// A missing version is handled by the configured policy: `Reject`
    /// returns `InvalidVersion` and leaves the cursor alone; `ClampToLatest`
    /// selects the latest version and reports `Clamped`.
    pub fn select_version(&mut self, version: usize) -> Result<VersionSelection, SegmentTreeError> {
        if self.versions.set_current(version) {
            if self.config.verbose {
                debug!(version, "selected version");
            }
            return Ok(VersionSelection::Exact(version));
        }

        match self.config.version_policy {
            VersionPolicy::Reject => Err(SegmentTreeError::InvalidVersion {
                version,
                count: self.versions.len(),
            }),
            VersionPolicy::ClampToLatest => {
                let selected = self.versions.latest();
                self.versions.set_current(selected);
                warn!(requested = version, selected, "version clamped to latest");
                Ok(VersionSelection::Clamped {
                    requested: version,
                    selected,
                })
            }
        }
    }

    /// Physically distinct nodes reachable from any version root
    ///
    /// Shared subtrees are counted once; visited subtrees are not re-entered.
    pub fn reachable_nodes(&self) -> usize {
        let mut seen: HashSet<*const Node<M::Value>> = HashSet::new();
        let mut stack: Vec<&Node<M::Value>> = self.versions.roots().map(Rc::as_ref).collect();

        while let Some(node) = stack.pop() {
            if !seen.insert(node as *const _) {
                continue;
            }
            if let Some((left_child, right_child)) = node.children() {
                stack.push(left_child.as_ref());
                stack.push(right_child.as_ref());
            }
        }

        seen.len()
    }

    /// Nodes allocated over the lifetime of the tree
    pub fn allocated_nodes(&self) -> usize {
        self.tracker.total_nodes()
    }

    /// Largest number of nodes a single update allocated
    pub fn max_update_nodes(&self) -> usize {
        self.tracker.max_update_nodes()
    }

    /// Allocation timeline (`None` unless profiling is enabled)
    pub fn allocation_profile(&self) -> Option<AllocationProfile> {
        self.tracker.profile()
    }

    fn check_index(&self, index: usize) -> Result<(), SegmentTreeError> {
        self.path_to(index).map(|_| ())
    }

    fn path_to(&self, index: usize) -> Result<PathToken, SegmentTreeError> {
        PathToken::to_index(Span::root(self.size), index).ok_or(SegmentTreeError::InvalidIndex {
            index,
            size: self.size,
        })
    }

    fn check_range(&self, left: usize, right: usize) -> Result<(), SegmentTreeError> {
        if left > right || right >= self.size {
            return Err(SegmentTreeError::InvalidRange {
                left,
                right,
                size: self.size,
            });
        }
        Ok(())
    }
}

impl<T, F> PersistentSegmentTree<FnMonoid<T, F>>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Build from an arbitrary associative callable and its neutral element
    pub fn from_fn(values: &[T], op: F, identity: T) -> Result<Self, SegmentTreeError> {
        Self::new(values, FnMonoid::new(op, identity))
    }
}

impl<M> fmt::Debug for PersistentSegmentTree<M>
where
    M: Monoid + fmt::Debug,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentSegmentTree")
            .field("monoid", &self.monoid)
            .field("size", &self.size)
            .field("versions", &self.versions.len())
            .field("current", &self.versions.current())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{Min, Sum};

    #[test]
    fn test_build_leaves_match_input() {
        let values = [2, 5, 1, 4, 9, 3];
        let tree = PersistentSegmentTree::new(&values, Min::new()).expect("non-empty");

        for (i, expected) in values.iter().enumerate() {
            assert_eq!(tree.query(0, i, i).expect("valid range"), *expected);
            assert_eq!(tree.get(0, i).expect("valid index"), *expected);
        }
        assert_eq!(tree.values(0).expect("version 0"), values.to_vec());
    }

    #[test]
    fn test_empty_rejected() {
        let result = PersistentSegmentTree::new(&[] as &[i32], Sum::new());
        assert_eq!(result.err(), Some(SegmentTreeError::InvalidSize));
    }

    #[test]
    fn test_build_allocates_2n_minus_1() {
        let values: Vec<i64> = (0..13).collect();
        let tree = PersistentSegmentTree::new(&values, Sum::new()).expect("non-empty");
        assert_eq!(tree.allocated_nodes(), 25);
        assert_eq!(tree.reachable_nodes(), 25);
    }

    #[test]
    fn test_update_shares_siblings() {
        let values = [0, 1, 3, 5, -2, 3];
        let mut tree = PersistentSegmentTree::new(&values, Sum::new()).expect("non-empty");
        let v1 = tree.update(4, -5).expect("valid index");

        let old = tree.root(0).expect("version 0");
        let new = tree.root(v1).expect("version 1");
        assert!(!Rc::ptr_eq(old, new));

        // Index 4 lives in the upper half; the lower half is shared
        assert!(Rc::ptr_eq(
            old.left().expect("internal"),
            new.left().expect("internal")
        ));
        assert!(!Rc::ptr_eq(
            old.right().expect("internal"),
            new.right().expect("internal")
        ));

        // [0,5] -> [3,5] -> [3,4] -> [4]
        assert_eq!(tree.max_update_nodes(), 4);
        assert_eq!(tree.reachable_nodes(), 11 + 4);
    }

    #[test]
    fn test_single_element() {
        let mut tree = PersistentSegmentTree::new(&[7u32], Sum::new()).expect("non-empty");
        assert_eq!(tree.query(0, 0, 0), Ok(7));
        let v1 = tree.update(0, 9).expect("valid index");
        assert_eq!(tree.query(v1, 0, 0), Ok(9));
        assert_eq!(tree.query(0, 0, 0), Ok(7));
        assert_eq!(tree.max_update_nodes(), 1);
    }

    #[test]
    fn test_query_validation_order() {
        let tree = PersistentSegmentTree::new(&[1, 2, 3], Sum::new()).expect("non-empty");
        // Version is checked before the range
        assert_eq!(
            tree.query(5, 2, 1),
            Err(SegmentTreeError::InvalidVersion { version: 5, count: 1 })
        );
        assert_eq!(
            tree.query(0, 0, 3),
            Err(SegmentTreeError::InvalidRange {
                left: 0,
                right: 3,
                size: 3
            })
        );
    }

    #[test]
    fn test_failed_update_creates_no_version() {
        let mut tree = PersistentSegmentTree::new(&[1, 2, 3], Sum::new()).expect("non-empty");
        assert_eq!(
            tree.update(3, 0),
            Err(SegmentTreeError::InvalidIndex { index: 3, size: 3 })
        );
        assert_eq!(tree.version_count(), 1);
        assert_eq!(tree.allocated_nodes(), 5);
    }
}
