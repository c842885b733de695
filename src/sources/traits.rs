use async_trait::async_trait;

use crate::errors::SourceResult;

/// Retrieves a playlist document as text
///
/// Implementations perform a single bounded-time attempt; there is no retry.
#[async_trait]
pub trait PlaylistFetcher: Send + Sync {
    /// Fetch the raw document at `url`
    async fn fetch_text(&self, url: &str) -> SourceResult<String>;
}
