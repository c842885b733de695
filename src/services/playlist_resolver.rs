//! Fetch-parse-answer pipeline behind the catalog, meta and stream resources
//!
//! Every call performs a fresh fetch and parse; nothing is cached between
//! requests, so concurrent requests never share state. A failed fetch is
//! logged and answered as an empty playlist.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::addon::effective_playlist_url;
use crate::config::Config;
use crate::models::{Entry, StreamRef};
use crate::playlist::{Playlist, PlaylistParser};
use crate::sources::{HttpPlaylistFetcher, PlaylistFetcher};
use crate::utils::redact_url;

#[derive(Clone)]
pub struct PlaylistResolver {
    fetcher: Arc<dyn PlaylistFetcher>,
    parser: PlaylistParser,
    default_url: String,
}

impl PlaylistResolver {
    pub fn new<U: Into<String>>(
        fetcher: Arc<dyn PlaylistFetcher>,
        parser: PlaylistParser,
        default_url: U,
    ) -> Self {
        Self {
            fetcher,
            parser,
            default_url: default_url.into(),
        }
    }

    /// Resolver backed by the HTTP fetcher, as configured
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(HttpPlaylistFetcher::new(&config.playlist)),
            PlaylistParser::new(config.addon.poster.clone()),
            config.playlist.default_url.clone(),
        )
    }

    pub fn default_url(&self) -> &str {
        &self.default_url
    }

    /// Effective playlist URL for an optional configuration path segment
    pub fn effective_url(&self, config_segment: Option<&str>) -> String {
        effective_playlist_url(config_segment, &self.default_url)
    }

    /// Fetch and parse `url`; fetch failures yield an empty playlist
    pub async fn load(&self, url: &str) -> Playlist {
        let url = if url.trim().is_empty() {
            self.default_url.as_str()
        } else {
            url
        };

        match self.fetcher.fetch_text(url).await {
            Ok(content) => {
                let playlist = self.parser.parse(&content);
                debug!(
                    "Resolved {} entries from {}",
                    playlist.len(),
                    redact_url(url)
                );
                playlist
            }
            Err(e) => {
                warn!("Playlist unavailable, answering with no entries: {}", e);
                Playlist::default()
            }
        }
    }

    pub async fn resolve_catalog(&self, url: &str) -> Vec<Entry> {
        self.load(url).await.into_entries()
    }

    pub async fn resolve_meta(&self, url: &str, id: &str) -> Option<Entry> {
        self.load(url).await.find(id).cloned()
    }

    pub async fn resolve_stream(&self, url: &str, id: &str) -> Vec<StreamRef> {
        self.load(url).await.streams(id)
    }
}
