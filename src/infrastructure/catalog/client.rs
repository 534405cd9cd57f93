//! iTunes software search HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::dto::SearchResponse;
use crate::domain::entities::Item;
use crate::domain::errors::FetchError;
use crate::domain::ports::CatalogPort;

/// Default search service root.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://itunes.apple.com";
/// Default entity filter sent with every search.
pub const DEFAULT_ENTITY: &str = "software";

/// Catalog search client.
#[derive(Debug, Clone)]
pub struct ItunesCatalogClient {
    client: Client,
    base_url: String,
    entity: String,
}

impl ItunesCatalogClient {
    /// Creates client sharing an existing HTTP client.
    #[must_use]
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        entity: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            entity: entity.into(),
        }
    }

    /// Search endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl CatalogPort for ItunesCatalogClient {
    async fn search(&self, query: &str) -> Result<Vec<Item>, FetchError> {
        debug!(query = %query, "Searching catalog");

        let response = self
            .client
            .get(self.endpoint())
            .query(&[("entity", self.entity.as_str()), ("term", query)])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach catalog");
                FetchError::from_request(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Catalog rejected search");
            return Err(FetchError::bad_response(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(format!("failed to read body: {e}")))?;

        let parsed: SearchResponse = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse search response");
            FetchError::decode(e.to_string())
        })?;

        let reported = parsed.result_count;
        let items = parsed.into_items();
        if items.len() < reported {
            debug!(
                query = %query,
                reported,
                kept = items.len(),
                "Dropped catalog records with invalid URLs"
            );
        }
        debug!(query = %query, count = items.len(), "Catalog search completed");
        Ok(items)
    }
}
