//! HTTP resource transport.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use crate::domain::entities::ResourceId;
use crate::domain::errors::FetchError;
use crate::domain::ports::ResourceTransport;

/// Fetches resource bytes with a plain GET.
#[derive(Debug, Clone)]
pub struct HttpResourceTransport {
    client: Client,
}

impl HttpResourceTransport {
    /// Creates a transport sharing an existing client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceTransport for HttpResourceTransport {
    async fn fetch(&self, id: &ResourceId) -> Result<Bytes, FetchError> {
        debug!(id = %id, "Downloading resource");

        let response = self.client.get(id.as_str()).send().await.map_err(|e| {
            warn!(id = %id, error = %e, "Resource request failed");
            FetchError::from_request(&e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(id = %id, status = %status, "Resource request rejected");
            return Err(FetchError::bad_response(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| FetchError::network(format!("failed to read body: {e}")))
    }
}
