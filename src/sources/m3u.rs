//! HTTP playlist fetcher
//!
//! Performs one GET per call with a hard timeout covering connect, headers
//! and body. Non-success statuses are failures; the body is returned as-is.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::traits::PlaylistFetcher;
use crate::config::PlaylistConfig;
use crate::errors::{SourceError, SourceResult};
use crate::utils::redact_url;

pub struct HttpPlaylistFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpPlaylistFetcher {
    pub fn new(config: &PlaylistConfig) -> Self {
        Self::with_timeout(config.fetch_timeout(), &config.user_agent)
    }

    pub fn with_timeout(timeout: Duration, user_agent: &str) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl PlaylistFetcher for HttpPlaylistFetcher {
    async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        debug!("Fetching playlist: {}", redact_url(url));

        // per-request timeout as well, the builder fallback above has none
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(redact_url(url), &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::http(status.as_u16(), redact_url(url)));
        }

        let content = response
            .text()
            .await
            .map_err(|e| SourceError::from_reqwest(redact_url(url), &e))?;

        debug!(
            "Fetched {} bytes from {}",
            content.len(),
            redact_url(url)
        );
        Ok(content)
    }
}
