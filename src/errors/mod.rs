//! Error handling for the addon service
//!
//! Playlist-related failures are deliberately non-fatal: the resolver turns
//! every [`SourceError`] into an empty entry collection and every
//! [`DecodeError`] into the default playlist URL. The types here exist so
//! those failures can be logged precisely before they are swallowed.
//!
//! # Error Categories
//!
//! - **Source Errors**: fetching the playlist document (timeout, status, I/O)
//! - **Decode Errors**: the per-request configuration path segment
//! - **Configuration Errors**: service configuration loading and validation

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
