//! Fetcher
//!
//! Cache-first loading with single-flight de-duplication: concurrent misses
//! for the same identifier share one upstream request.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::cache::{Cache, Codec, WriteStatus};
use crate::error::FetchError;
use crate::fetch::NetworkClient;

type Slot<V> = Arc<OnceCell<Result<V, FetchError>>>;

// == Fetcher ==
pub struct Fetcher<C: Codec, N: NetworkClient> {
    cache: Arc<Cache<C>>,
    client: N,
    in_flight: Mutex<HashMap<String, Slot<C::Value>>>,
}

impl<C: Codec, N: NetworkClient> Fetcher<C, N> {
    pub fn new(cache: Arc<Cache<C>>, client: N) -> Self {
        Self {
            cache,
            client,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn cache(&self) -> &Arc<Cache<C>> {
        &self.cache
    }

    pub fn client(&self) -> &N {
        &self.client
    }

    // == Load ==
    /// Returns the cached value for `identifier`, fetching `url` on a miss.
    ///
    /// A successful fetch is written to the cache before returning. Network
    /// and decode failures are returned to every caller waiting on the
    /// request; nothing is cached for them.
    pub async fn load(&self, identifier: &str, url: &str) -> Result<C::Value, FetchError> {
        if let Some(value) = self.cache.get(identifier).into_option() {
            return Ok(value);
        }

        let slot = self
            .in_flight
            .lock()
            .entry(identifier.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let result = slot
            .get_or_init(|| self.fetch_and_store(identifier, url))
            .await
            .clone();

        let mut in_flight = self.in_flight.lock();
        if in_flight
            .get(identifier)
            .is_some_and(|current| Arc::ptr_eq(current, &slot))
        {
            in_flight.remove(identifier);
        }

        result
    }

    /// Number of identifiers with a request currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }

    async fn fetch_and_store(&self, identifier: &str, url: &str) -> Result<C::Value, FetchError> {
        debug!(identifier, url, "cache miss, fetching");
        let payload = self.client.fetch(url).await.map_err(|e| {
            warn!(identifier, url, error = %e, "fetch failed");
            e
        })?;

        let value = self
            .cache
            .codec()
            .from_payload(&payload)
            .map_err(FetchError::Decode)?;

        if let WriteStatus::Degraded(e) = self.cache.put(identifier, value.clone()) {
            debug!(identifier, error = %e, "fetched value not cached");
        }
        Ok(value)
    }
}
