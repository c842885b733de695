use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::DecodeError;
use crate::utils::{is_http_url, redact_url};

const MAX_LOGGED_VALUE_LEN: usize = 64;

/// Decoded configuration segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub m3u: Option<String>,
}

impl UserConfig {
    /// Configured playlist URL, `None` when absent or blank
    pub fn playlist_url(&self) -> Option<&str> {
        self.m3u.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }
}

/// Decode a configuration path segment.
///
/// The segment is expected to be already percent-decoded by the router and is
/// either a JSON object with an `m3u` field or a bare http(s) URL. Segments
/// that are still percent-encoded are decoded once more before giving up.
pub fn decode_user_config(segment: &str) -> Result<UserConfig, DecodeError> {
    match decode_plain(segment) {
        Err(err) if segment.contains('%') => {
            let decoded = urlencoding::decode(segment)?;
            if decoded == segment {
                return Err(err);
            }
            decode_plain(&decoded)
        }
        result => result,
    }
}

fn decode_plain(segment: &str) -> Result<UserConfig, DecodeError> {
    let value = segment.trim();
    if value.is_empty() {
        return Ok(UserConfig::default());
    }
    if value.starts_with('{') {
        return Ok(serde_json::from_str(value)?);
    }
    if is_http_url(value) {
        return Ok(UserConfig {
            m3u: Some(value.to_string()),
        });
    }
    Err(DecodeError::not_a_url(truncate_for_log(value)))
}

/// Resolve the playlist URL for one request.
///
/// Absent, blank or undecodable configuration falls back to `default_url`.
pub fn effective_playlist_url(segment: Option<&str>, default_url: &str) -> String {
    let Some(segment) = segment else {
        return default_url.to_string();
    };

    match decode_user_config(segment) {
        Ok(config) => match config.playlist_url() {
            Some(url) => {
                debug!("Using configured playlist: {}", redact_url(url));
                url.to_string()
            }
            None => default_url.to_string(),
        },
        Err(e) => {
            warn!("Ignoring undecodable addon configuration, using default playlist: {}", e);
            default_url.to_string()
        }
    }
}

fn truncate_for_log(value: &str) -> String {
    if value.chars().count() <= MAX_LOGGED_VALUE_LEN {
        value.to_string()
    } else {
        let mut truncated: String = value.chars().take(MAX_LOGGED_VALUE_LEN).collect();
        truncated.push('…');
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "http://default/list.m3u";

    #[test]
    fn test_json_object_with_m3u_field() {
        let config = decode_user_config(r#"{"m3u":"http://a/list.m3u"}"#).unwrap();
        assert_eq!(config.playlist_url(), Some("http://a/list.m3u"));
    }

    #[test]
    fn test_json_without_m3u_field() {
        let config = decode_user_config(r#"{"other":1}"#).unwrap();
        assert_eq!(config.playlist_url(), None);
    }

    #[test]
    fn test_raw_url_segment() {
        let config = decode_user_config("https://a/list.m3u?token=x").unwrap();
        assert_eq!(config.playlist_url(), Some("https://a/list.m3u?token=x"));
    }

    #[test]
    fn test_still_encoded_segment_is_decoded_once() {
        let encoded = urlencoding::encode(r#"{"m3u":"http://a/list.m3u"}"#).into_owned();
        let config = decode_user_config(&encoded).unwrap();
        assert_eq!(config.playlist_url(), Some("http://a/list.m3u"));

        let encoded = urlencoding::encode("http://a/list.m3u").into_owned();
        let config = decode_user_config(&encoded).unwrap();
        assert_eq!(config.playlist_url(), Some("http://a/list.m3u"));
    }

    #[test]
    fn test_decoded_url_keeps_its_own_escapes() {
        let config = decode_user_config(r#"{"m3u":"http://a/my%20list.m3u"}"#).unwrap();
        assert_eq!(config.playlist_url(), Some("http://a/my%20list.m3u"));
    }

    #[test]
    fn test_malformed_values_are_errors() {
        assert!(matches!(
            decode_user_config("{not json"),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            decode_user_config(r#"{"m3u":42}"#),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            decode_user_config("garbage"),
            Err(DecodeError::NotAUrl { .. })
        ));
        assert!(decode_user_config("%7Bbroken").is_err());
        assert!(decode_user_config("%FF%FE").is_err());
    }

    #[test]
    fn test_effective_url_prefers_configuration() {
        assert_eq!(
            effective_playlist_url(Some(r#"{"m3u":"http://a/list.m3u"}"#), DEFAULT),
            "http://a/list.m3u"
        );
        assert_eq!(
            effective_playlist_url(Some("http://b/list.m3u"), DEFAULT),
            "http://b/list.m3u"
        );
    }

    #[test]
    fn test_effective_url_falls_back_to_default() {
        assert_eq!(effective_playlist_url(None, DEFAULT), DEFAULT);
        assert_eq!(effective_playlist_url(Some(""), DEFAULT), DEFAULT);
        assert_eq!(effective_playlist_url(Some(r#"{"m3u":""}"#), DEFAULT), DEFAULT);
        assert_eq!(effective_playlist_url(Some(r#"{"m3u":"  "}"#), DEFAULT), DEFAULT);
        assert_eq!(effective_playlist_url(Some("{broken"), DEFAULT), DEFAULT);
        assert_eq!(effective_playlist_url(Some("garbage"), DEFAULT), DEFAULT);
    }

    #[test]
    fn test_long_values_are_truncated_in_errors() {
        let long = "x".repeat(200);
        let err = decode_user_config(&long).unwrap_err();
        assert!(err.to_string().len() < 120);
    }
}
