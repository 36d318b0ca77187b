//! Network client contract consumed by the fetcher.

use async_trait::async_trait;

use crate::error::FetchError;

/// Fetches a payload from upstream.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Returns the response body for `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
