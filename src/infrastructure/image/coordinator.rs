//! Cache-or-fetch coordinator for remote resources.
//!
//! A load checks the memory cache, falls back to the transport, decodes the
//! payload and stores it with insert-if-absent semantics. No lock spans the
//! whole load: two callers racing on the same unseen id both download it, and
//! both receive whichever copy reached the cache first.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{debug, trace, warn};

use crate::domain::entities::{Resource, ResourceId};
use crate::domain::errors::FetchError;
use crate::domain::ports::{ResourceCachePort, ResourceTransport};

/// Default maximum concurrent downloads.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Returns cached resources or performs the fetch needed to obtain one.
pub struct FetchCoordinator {
    cache: Arc<dyn ResourceCachePort>,
    transport: Arc<dyn ResourceTransport>,
    permits: Semaphore,
}

impl std::fmt::Debug for FetchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCoordinator")
            .field("cached", &self.cache.len())
            .field("available_permits", &self.permits.available_permits())
            .finish_non_exhaustive()
    }
}

impl FetchCoordinator {
    /// Creates a coordinator allowing at most `max_concurrent_fetches`
    /// downloads in flight (minimum 1).
    #[must_use]
    pub fn new(
        cache: Arc<dyn ResourceCachePort>,
        transport: Arc<dyn ResourceTransport>,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            cache,
            transport,
            permits: Semaphore::new(max_concurrent_fetches.max(1)),
        }
    }

    /// Returns the cached resource without touching the network.
    #[must_use]
    pub fn cached(&self, id: &ResourceId) -> Option<Resource> {
        self.cache.get(id)
    }

    /// Loads a resource, checking the cache first.
    ///
    /// # Errors
    /// Returns `BadResponse` on a non-success status, `DecodeFailure` when the
    /// payload is not a supported image, `Network` when the request failed.
    pub async fn load(&self, id: &ResourceId) -> Result<Resource, FetchError> {
        if let Some(resource) = self.cache.get(id) {
            return Ok(resource);
        }

        let bytes = {
            let _permit = self.acquire_permit(id).await?;
            self.transport.fetch(id).await?
        };

        self.store(id, bytes).await
    }

    /// Like [`load`](Self::load), but gives up without touching the network
    /// when `abandoned` reports true once a download permit is granted.
    ///
    /// Returns `Ok(None)` for an abandoned load. An abandoned load releases
    /// its permit to the next waiter immediately.
    ///
    /// # Errors
    /// Same as [`load`](Self::load).
    pub async fn load_unless<F>(
        &self,
        id: &ResourceId,
        abandoned: F,
    ) -> Result<Option<Resource>, FetchError>
    where
        F: Fn() -> bool,
    {
        if let Some(resource) = self.cache.get(id) {
            return Ok(Some(resource));
        }

        let bytes = {
            let _permit = self.acquire_permit(id).await?;
            if abandoned() {
                trace!(id = %id, "Load abandoned while waiting for a permit");
                return Ok(None);
            }
            self.transport.fetch(id).await?
        };

        self.store(id, bytes).await.map(Some)
    }

    async fn acquire_permit(&self, id: &ResourceId) -> Result<SemaphorePermit<'_>, FetchError> {
        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| FetchError::network("download pool closed"))?;
        trace!(id = %id, "Acquired download permit");
        Ok(permit)
    }

    async fn store(&self, id: &ResourceId, bytes: Bytes) -> Result<Resource, FetchError> {
        let decoded = decode(bytes).await.inspect_err(|e| {
            warn!(id = %id, error = %e, "Failed to decode resource");
        })?;

        let resident = self.cache.put(id.clone(), Arc::new(decoded));
        debug!(id = %id, source = "network", "Resource loaded");
        Ok(resident)
    }
}

async fn decode(bytes: Bytes) -> Result<image::DynamicImage, FetchError> {
    tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .map_err(|e| FetchError::decode(format!("decode task panicked: {e}")))?
        .map_err(|e| FetchError::decode(e.to_string()))
}
