//! In-memory LRU resource cache implementation.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::entities::{Resource, ResourceId};
use crate::domain::ports::ResourceCachePort;

/// Default maximum number of resources kept in memory.
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// In-memory LRU cache for decoded resources.
///
/// One lock acquisition per operation. A `get` clones the `Arc` out while the
/// lock is held, so eviction can never pull a resource from under a reader.
pub struct MemoryResourceCache {
    cache: Mutex<LruCache<ResourceId, Resource>>,
    capacity: NonZeroUsize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryResourceCache {
    /// Creates a new cache holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(cap)),
            capacity: cap,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a new cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }

    /// Peeks at a resource without promoting it in the LRU.
    pub fn peek(&self, id: &ResourceId) -> Option<Resource> {
        self.cache.lock().peek(id).cloned()
    }
}

impl Default for MemoryResourceCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl std::fmt::Debug for MemoryResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryResourceCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached resources.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} images, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

impl ResourceCachePort for MemoryResourceCache {
    fn get(&self, id: &ResourceId) -> Option<Resource> {
        let mut cache = self.cache.lock();
        if let Some(resource) = cache.get(id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(id = %id, "Memory cache hit");
            Some(resource.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(id = %id, "Memory cache miss");
            None
        }
    }

    fn put(&self, id: ResourceId, resource: Resource) -> Resource {
        let mut cache = self.cache.lock();
        if let Some(existing) = cache.get(&id) {
            trace!(id = %id, "Entry already present, discarding duplicate");
            return existing.clone();
        }

        debug!(id = %id, "Storing resource in memory cache");
        if let Some((evicted, _)) = cache.push(id, resource.clone()) {
            debug!(id = %evicted, "Evicted resource from memory cache");
        }
        resource
    }

    fn len(&self) -> usize {
        self.cache.lock().len()
    }

    fn capacity(&self) -> usize {
        self.capacity.get()
    }

    fn clear(&self) {
        self.cache.lock().clear();
        debug!("Cleared memory resource cache");
    }
}
