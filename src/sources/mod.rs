//! Playlist sources
//!
//! The resolver only depends on [`PlaylistFetcher`]; [`HttpPlaylistFetcher`]
//! is the production implementation.

pub mod m3u;
pub mod traits;

pub use m3u::HttpPlaylistFetcher;
pub use traits::PlaylistFetcher;
