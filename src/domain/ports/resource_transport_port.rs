//! Port definition for raw resource retrieval.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::ResourceId;
use crate::domain::errors::FetchError;

/// Retrieves the raw bytes behind a resource id.
#[async_trait]
pub trait ResourceTransport: Send + Sync {
    /// Fetches the payload. Fails with `BadResponse` on a non-success status.
    async fn fetch(&self, id: &ResourceId) -> Result<Bytes, FetchError>;
}
