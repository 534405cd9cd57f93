//! Port definition for the in-memory resource cache.

use crate::domain::entities::{Resource, ResourceId};

/// Bounded store of decoded resources keyed by id.
///
/// Every method is individually atomic; callers need no extra locking. Reads
/// and writes from unrelated callers are not serialized beyond that, so a
/// reader may miss an insert that is racing with it.
pub trait ResourceCachePort: Send + Sync {
    /// Returns the cached resource, or `None` when absent. Never fails.
    fn get(&self, id: &ResourceId) -> Option<Resource>;

    /// Inserts `resource` unless an entry for `id` already exists.
    ///
    /// Returns the resident resource: the argument when it was inserted, the
    /// earlier entry when this call lost the race.
    fn put(&self, id: ResourceId, resource: Resource) -> Resource;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns true if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries kept.
    fn capacity(&self) -> usize;

    /// Drops every entry.
    fn clear(&self);
}
