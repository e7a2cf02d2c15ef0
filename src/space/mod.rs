//! Node allocation accounting
//!
//! Tracks how many nodes each version added to the forest, to verify the
//! path-copy bound: an update allocates at most ⌈log2(size)⌉ + 1 nodes.

mod allocator;

pub use allocator::AllocationTracker;

/// Detailed allocation profile (if enabled)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct AllocationProfile {
    /// Nodes allocated over the lifetime of the tree
    pub total_nodes: usize,

    /// Nodes allocated per version; entry 0 is the initial build
    pub per_version: Vec<usize>,

    /// Largest single-update allocation
    pub max_update_nodes: usize,

    /// Depth of the tree (⌈log2(size)⌉)
    pub height: usize,
}

impl AllocationProfile {
    /// Every update stayed within `height + 1` new nodes
    pub fn satisfies_path_bound(&self) -> bool {
        self.max_update_nodes <= self.height + 1
    }

    /// Human-readable summary
    pub fn report(&self) -> String {
        format!(
            "Nodes allocated: {}\nVersions: {}\n  Build: {}\n  Largest update: {} (bound {})",
            self.total_nodes,
            self.per_version.len(),
            self.per_version.first().copied().unwrap_or(0),
            self.max_update_nodes,
            self.height + 1
        )
    }
}
