//! Per-node GPU resources tied to one scene snapshot.

use rustc_hash::FxHashMap;

/// Resources indexed by node position, valid for a single snapshot
/// revision. Moving to a different revision drops everything.
pub struct GpuArena<T> {
    revision: Option<u64>,
    slots: FxHashMap<usize, T>,
}

impl<T> Default for GpuArena<T> {
    fn default() -> Self {
        Self {
            revision: None,
            slots: FxHashMap::default(),
        }
    }
}

impl<T> GpuArena<T> {
    /// Empty arena bound to no snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the arena to `revision`. Returns `true` if cached resources
    /// were released because the revision changed.
    pub fn sync(&mut self, revision: Option<u64>) -> bool {
        if self.revision == revision {
            return false;
        }
        let released = !self.slots.is_empty();
        if released {
            log::debug!(
                "releasing {} node resources for snapshot {:?}",
                self.slots.len(),
                self.revision
            );
        }
        self.slots.clear();
        self.revision = revision;
        released
    }

    /// Revision the cached resources belong to.
    #[must_use]
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// Resources for node `index`, creating them with `create` on first use.
    pub fn get_or_insert_with(
        &mut self,
        index: usize,
        create: impl FnOnce() -> T,
    ) -> &T {
        self.slots.entry(index).or_insert_with(create)
    }

    /// Cached resources for node `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(&index)
    }

    /// Number of cached nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_are_created_once_per_revision() {
        let mut arena = GpuArena::new();
        assert!(!arena.sync(Some(1)));
        let mut created = 0;
        for _ in 0..3 {
            let _ = arena.get_or_insert_with(0, || {
                created += 1;
                "buffers"
            });
        }
        assert_eq!(created, 1);
        assert!(!arena.sync(Some(1)));
        assert_eq!(arena.get(0), Some(&"buffers"));
    }

    #[test]
    fn new_revision_releases_everything() {
        let mut arena = GpuArena::new();
        let _ = arena.sync(Some(1));
        let _ = arena.get_or_insert_with(0, || 10);
        let _ = arena.get_or_insert_with(3, || 13);
        assert_eq!(arena.len(), 2);

        assert!(arena.sync(Some(2)));
        assert!(arena.is_empty());
        assert_eq!(arena.revision(), Some(2));

        assert!(!arena.sync(None));
        assert_eq!(arena.revision(), None);
    }
}
