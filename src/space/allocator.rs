//! Allocation tracking for node-sharing verification

use super::AllocationProfile;

/// Counts nodes allocated by the build and by every update
#[derive(Debug, Clone)]
pub struct AllocationTracker {
    /// Nodes allocated since the last `finish_version`
    pending: usize,

    /// Total over all versions
    total: usize,

    /// Largest update seen (build excluded)
    max_update: usize,

    /// Versions committed so far
    versions: usize,

    /// Per-version counts (only when profiling)
    profile: Option<Vec<usize>>,

    height: usize,
}

impl AllocationTracker {
    /// Create tracker for a tree of the given height
    pub fn new(height: usize, profile_enabled: bool) -> Self {
        Self {
            pending: 0,
            total: 0,
            max_update: 0,
            versions: 0,
            profile: if profile_enabled { Some(Vec::new()) } else { None },
            height,
        }
    }

    /// Record one node allocation for the version being built
    #[inline]
    pub fn allocate_node(&mut self) {
        self.pending += 1;
    }

    /// Commit pending allocations as one version
    ///
    /// Returns the number of nodes the version added.
    pub fn finish_version(&mut self) -> usize {
        let added = std::mem::take(&mut self.pending);
        self.total += added;
        if self.versions > 0 {
            self.max_update = self.max_update.max(added);
        }
        self.versions += 1;

        if let Some(ref mut timeline) = self.profile {
            timeline.push(added);
        }

        added
    }

    /// Nodes allocated over all committed versions
    pub fn total_nodes(&self) -> usize {
        self.total
    }

    /// Largest update allocation
    pub fn max_update_nodes(&self) -> usize {
        self.max_update
    }

    /// Snapshot of the profile (`None` unless profiling is enabled)
    pub fn profile(&self) -> Option<AllocationProfile> {
        self.profile.as_ref().map(|timeline| AllocationProfile {
            total_nodes: self.total,
            per_version: timeline.clone(),
            max_update_nodes: self.max_update,
            height: self.height,
        })
    }
}
