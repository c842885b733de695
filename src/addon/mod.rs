//! Per-request addon configuration
//!
//! Stremio passes the user's configuration as the first path segment of every
//! addon URL. This module turns that segment into the effective playlist URL.

pub mod user_config;

pub use user_config::{decode_user_config, effective_playlist_url, UserConfig};
