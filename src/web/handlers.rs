//! HTTP request handlers, organized by resource

pub mod addon;
pub mod configure;
pub mod health;

/// Strip the `.json` extension Stremio appends to resource ids
pub(crate) fn strip_json_suffix(segment: &str) -> Option<&str> {
    segment
        .strip_suffix(".json")
        .filter(|id| !id.is_empty())
}
