//! Infrastructure layer with external service adapters.

/// Catalog search client.
pub mod catalog;
/// Application configuration.
pub mod config;
/// Image handling (caching, transport, cache-or-fetch coordination).
pub mod image;

#[cfg(test)]
pub(crate) mod test_server;

pub use catalog::ItunesCatalogClient;
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use image::{
    CacheStats, FetchCoordinator, HttpResourceTransport, MemoryResourceCache,
};
