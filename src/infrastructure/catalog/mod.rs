//! Remote catalog search client.

pub mod client;
pub mod dto;

pub use client::{DEFAULT_CATALOG_BASE_URL, DEFAULT_ENTITY, ItunesCatalogClient};
