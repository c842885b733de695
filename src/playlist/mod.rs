//! Playlist parsing and lookup
//!
//! A [`Playlist`] lives for exactly one fetch-parse cycle: it is built from
//! the fetched text, queried to answer one request, then dropped.

pub mod parser;

use std::collections::HashMap;

use crate::models::{Entry, StreamRef};

pub use parser::PlaylistParser;

/// Ordered, id-addressable entry collection
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Playlist {
    pub(crate) fn from_entries(entries: Vec<Entry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (entry.id.clone(), pos))
            .collect();
        Self { entries, index }
    }

    /// All entries in document order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    pub fn find_url(&self, id: &str) -> Option<&str> {
        self.find(id).map(|entry| entry.url.as_str())
    }

    /// One stream reference for a matched id, none otherwise
    pub fn streams(&self, id: &str) -> Vec<StreamRef> {
        self.find(id).map(Entry::stream).into_iter().collect()
    }
}
