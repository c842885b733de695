//! Utility functions for the M3U VOD addon

use url::Url;

/// Sanitize a base URL by removing trailing slashes and ensuring proper format
pub fn sanitize_base_url(base_url: &str) -> String {
    let mut url = base_url.trim().to_string();

    // Remove trailing slashes
    while url.ends_with('/') {
        url.pop();
    }

    // Ensure we have a scheme
    if !url.starts_with("http://") && !url.starts_with("https://") {
        url = format!("http://{}", url);
    }

    url
}

/// Strip credentials, query and fragment from a URL before it is logged.
///
/// Playlist providers commonly carry account tokens in the query string.
/// Anything that does not parse as a URL is returned unchanged.
pub fn redact_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            let had_query = url.query().is_some();
            url.set_query(None);
            url.set_fragment(None);
            let _ = url.set_username("");
            let _ = url.set_password(None);
            let mut redacted = url.to_string();
            if had_query {
                redacted.push_str("?…");
            }
            redacted
        }
        Err(_) => raw.to_string(),
    }
}

/// Whether `raw` is an absolute http(s) URL with a host
pub fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
