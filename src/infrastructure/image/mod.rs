//! Image handling infrastructure.
//!
//! This module provides:
//! - Memory caching with LRU eviction
//! - HTTP retrieval of raw image bytes
//! - The cache-or-fetch coordinator used by result rows

pub mod coordinator;
pub mod http_transport;
pub mod memory_cache;

pub use coordinator::{DEFAULT_MAX_CONCURRENT_FETCHES, FetchCoordinator};
pub use http_transport::HttpResourceTransport;
pub use memory_cache::{CacheStats, DEFAULT_CACHE_CAPACITY, MemoryResourceCache};
