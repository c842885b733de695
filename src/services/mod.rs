//! Service layer
//!
//! Services hold the business logic the web handlers delegate to.

pub mod playlist_resolver;

pub use playlist_resolver::PlaylistResolver;
