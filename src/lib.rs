//! # Persistent Segment Tree
//!
//! Generic, versioned interval aggregation: given an array and a monoid
//! (associative operation + neutral element), answer "combined value of
//! `[l, r]`" in O(log n) against any historical version, and apply point
//! updates that create a new immutable version in O(log n) time and space.
//!
//! ## Core Algorithm
//!
//! 1. **Balanced build**: split `[0, size - 1]` at `lo + (hi - lo) / 2` down to leaves
//! 2. **Range decomposition**: disjoint spans contribute the identity, covered spans
//!    return their stored aggregate, partial overlaps recurse
//! 3. **Path copying**: an update allocates only the root-to-leaf path and shares
//!    every untouched subtree with the previous version
//! 4. **Version table**: append-only list of roots plus a current-version cursor
//!
//! ## Usage Example
//!
//! ```
//! use perseg::{algebra::Min, PersistentSegmentTree};
//!
//! let mut tree = PersistentSegmentTree::new(&[2, 5, 1, 4, 9, 3], Min::new())?;
//! assert_eq!(tree.query(0, 0, 5)?, 1);
//!
//! let v1 = tree.update(5, -11)?;
//! assert_eq!(tree.query(v1, 0, 5)?, -11);
//! assert_eq!(tree.query(0, 0, 5)?, 1);
//! # Ok::<(), perseg::SegmentTreeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod algebra; // Monoid capability and stock monoids
pub mod persistent; // Path-copying versioned tree
pub mod plain; // In-place single-version tree
pub mod space; // Node allocation accounting
pub mod tree; // Implicit spans and paths

pub use algebra::{FnMonoid, Max, Min, Monoid, Sum};
pub use persistent::{Node, PersistentSegmentTree, VersionTable};
pub use plain::SegmentTree;
pub use space::AllocationProfile;

use thiserror::Error;

/// Errors reported by tree operations
///
/// All are caller-input errors, detected before any allocation or
/// version-table mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentTreeError {
    /// Construction from an empty array
    #[error("cannot build a segment tree over an empty array")]
    InvalidSize,

    /// Point index outside `[0, size - 1]`
    #[error("index {index} out of range for size {size}")]
    InvalidIndex {
        /// Requested index
        index: usize,
        /// Number of elements
        size: usize,
    },

    /// Version that was never created
    #[error("version {version} does not exist ({count} versions)")]
    InvalidVersion {
        /// Requested version
        version: usize,
        /// Number of existing versions
        count: usize,
    },

    /// Malformed query bounds
    #[error("invalid query range [{left}, {right}] for size {size}")]
    InvalidRange {
        /// Lower bound (inclusive)
        left: usize,
        /// Upper bound (inclusive)
        right: usize,
        /// Number of elements
        size: usize,
    },
}

/// Behaviour of `select_version` for an index that does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum VersionPolicy {
    /// Fail with `InvalidVersion`, cursor unchanged
    #[default]
    Reject,

    /// Move the cursor to the latest version and report `Clamped`
    ClampToLatest,
}

/// Outcome of a successful `select_version`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelection {
    /// The requested version is now current
    Exact(usize),

    /// The requested version did not exist; `selected` is now current
    Clamped {
        /// Version the caller asked for
        requested: usize,
        /// Version actually selected (the latest)
        selected: usize,
    },
}

impl VersionSelection {
    /// Version that became current
    pub fn selected(&self) -> usize {
        match *self {
            VersionSelection::Exact(version) => version,
            VersionSelection::Clamped { selected, .. } => selected,
        }
    }

    /// Whether the fallback policy kicked in
    pub fn is_clamped(&self) -> bool {
        matches!(self, VersionSelection::Clamped { .. })
    }
}

/// Configuration for a persistent tree
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TreeConfig {
    /// Fallback for out-of-range version selection
    pub version_policy: VersionPolicy,

    /// Keep a per-version allocation timeline
    pub profile_allocations: bool,

    /// Emit a debug event for every update and selection
    pub verbose: bool,
}

impl TreeConfig {
    /// Set the version-selection policy
    pub fn with_version_policy(mut self, policy: VersionPolicy) -> Self {
        self.version_policy = policy;
        self
    }

    /// Enable allocation profiling
    pub fn with_allocation_profiling(mut self, enabled: bool) -> Self {
        self.profile_allocations = enabled;
        self
    }

    /// Enable verbose mode
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_rejects() {
        let config = TreeConfig::default();
        assert_eq!(config.version_policy, VersionPolicy::Reject);
        assert!(!config.profile_allocations);
    }

    #[test]
    fn test_builder() {
        let config = TreeConfig::default()
            .with_version_policy(VersionPolicy::ClampToLatest)
            .with_allocation_profiling(true)
            .with_verbose(true);
        assert_eq!(config.version_policy, VersionPolicy::ClampToLatest);
        assert!(config.profile_allocations);
        assert!(config.verbose);
    }

    #[test]
    fn test_selection_accessors() {
        assert_eq!(VersionSelection::Exact(3).selected(), 3);
        let clamped = VersionSelection::Clamped {
            requested: 9,
            selected: 2,
        };
        assert_eq!(clamped.selected(), 2);
        assert!(clamped.is_clamped());
    }

    #[test]
    fn test_error_messages() {
        let err = SegmentTreeError::InvalidRange {
            left: 4,
            right: 2,
            size: 6,
        };
        assert_eq!(err.to_string(), "invalid query range [4, 2] for size 6");
        assert_eq!(
            SegmentTreeError::InvalidVersion { version: 7, count: 3 }.to_string(),
            "version 7 does not exist (3 versions)"
        );
    }
}
