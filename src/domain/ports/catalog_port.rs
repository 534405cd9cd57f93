//! Catalog search port definition.

use async_trait::async_trait;

use crate::domain::entities::Item;
use crate::domain::errors::FetchError;

/// Port for the remote catalog search.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Returns matching items in response order.
    async fn search(&self, query: &str) -> Result<Vec<Item>, FetchError>;
}
