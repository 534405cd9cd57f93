mod catalog_port;
mod resource_cache_port;
mod resource_transport_port;

pub use catalog_port::CatalogPort;
pub use resource_cache_port::ResourceCachePort;
pub use resource_transport_port::ResourceTransport;

#[cfg(test)]
pub mod mocks {
    pub use super::catalog_port::mock::MockCatalog;
    pub use super::resource_transport_port::mock::{MockResourceTransport, png_bytes};
}
