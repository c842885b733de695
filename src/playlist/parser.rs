//! Line-oriented M3U parser
//!
//! The parser is a two-state scanner. An `#EXTINF:` line stages a candidate
//! entry; the first following line that is neither blank nor a `#` directive
//! commits it as the entry URL. Directives and blank lines between the two are
//! skipped, so `#EXTGRP`, `#EXTVLCOPT` and friends do not break an entry.
//! A staged entry that never sees a URL line is dropped without consuming a
//! sequence number.

use tracing::{debug, trace};

use super::Playlist;
use crate::models::{entry_id, Entry, CONTENT_TYPE_MOVIE};

const EXTINF_MARKER: &str = "#EXTINF:";
const UTF8_BOM: char = '\u{feff}';

/// Candidate entry between its `#EXTINF:` line and its URL line
#[derive(Debug)]
struct StagedEntry {
    sequence: usize,
    title: String,
}

#[derive(Debug)]
enum ScanState {
    Idle,
    Pending(StagedEntry),
}

/// Builds [`Playlist`]s from raw M3U text
#[derive(Debug, Clone)]
pub struct PlaylistParser {
    poster: String,
}

impl PlaylistParser {
    /// `poster` is the placeholder artwork attached to every entry
    pub fn new<P: Into<String>>(poster: P) -> Self {
        Self {
            poster: poster.into(),
        }
    }

    /// Parse playlist text; never fails, malformed input yields fewer entries
    pub fn parse(&self, content: &str) -> Playlist {
        let mut entries = Vec::new();
        let mut state = ScanState::Idle;
        let mut next_sequence = 1usize;
        let mut abandoned = 0usize;

        let content = content.trim_start_matches(UTF8_BOM);
        for line in content.split(|c: char| c == '\n' || c == '\r').map(str::trim) {
            if let Some(info) = line.strip_prefix(EXTINF_MARKER) {
                if let ScanState::Pending(previous) = &state {
                    trace!("Dropping #EXTINF without URL: {:?}", previous.title);
                    abandoned += 1;
                }
                state = ScanState::Pending(StagedEntry {
                    sequence: next_sequence,
                    title: extract_title(info).to_string(),
                });
                continue;
            }

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match std::mem::replace(&mut state, ScanState::Idle) {
                ScanState::Pending(staged) => {
                    entries.push(self.commit(staged, line));
                    next_sequence += 1;
                }
                ScanState::Idle => {
                    trace!("Ignoring URL line without #EXTINF: {}", line);
                }
            }
        }

        if let ScanState::Pending(staged) = state {
            trace!("Dropping trailing #EXTINF without URL: {:?}", staged.title);
            abandoned += 1;
        }

        debug!(
            "Parsed {} playlist entries ({} #EXTINF lines without URL dropped)",
            entries.len(),
            abandoned
        );
        Playlist::from_entries(entries)
    }

    fn commit(&self, staged: StagedEntry, url: &str) -> Entry {
        let name = if staged.title.is_empty() {
            format!("Video {}", staged.sequence)
        } else {
            staged.title.clone()
        };
        let description = if staged.title.is_empty() {
            format!("Playlist entry {}", staged.sequence)
        } else {
            format!("Playlist entry {}: {}", staged.sequence, staged.title)
        };

        Entry {
            id: entry_id(staged.sequence),
            content_type: CONTENT_TYPE_MOVIE.to_string(),
            name,
            poster: self.poster.clone(),
            description,
            url: url.to_string(),
        }
    }
}

/// Text after the last comma of the `#EXTINF:` payload, trimmed
fn extract_title(info: &str) -> &str {
    info.rsplit_once(',')
        .map(|(_, title)| title.trim())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<Entry> {
        PlaylistParser::new("poster.png").parse(content).into_entries()
    }

    fn ids(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_two_well_formed_entries() {
        let entries = parse("#EXTINF:-1,Movie One\nhttp://a/1.mp4\n#EXTINF:-1,Movie Two\nhttp://a/2.mp4");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "vod-1");
        assert_eq!(entries[0].name, "Movie One");
        assert_eq!(entries[0].url, "http://a/1.mp4");
        assert_eq!(entries[1].id, "vod-2");
        assert_eq!(entries[1].name, "Movie Two");
        assert_eq!(entries[1].url, "http://a/2.mp4");
    }

    #[test]
    fn test_fixed_fields() {
        let entries = parse("#EXTINF:-1,Movie One\nhttp://a/1.mp4");
        assert_eq!(entries[0].content_type, "movie");
        assert_eq!(entries[0].poster, "poster.png");
        assert_eq!(entries[0].description, "Playlist entry 1: Movie One");
    }

    #[test]
    fn test_directive_between_extinf_and_url_is_tolerated() {
        let entries = parse("#EXTINF:-1,Movie\n#EXTGRP:Test\nhttp://a/1.mp4");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "http://a/1.mp4");
        assert_eq!(entries[0].name, "Movie");
    }

    #[test]
    fn test_blank_lines_between_extinf_and_url_are_tolerated() {
        let entries = parse("#EXTINF:-1,Movie\n\n   \n#EXTVLCOPT:http-user-agent=x\n\nhttp://a/1.mp4\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "http://a/1.mp4");
    }

    #[test]
    fn test_trailing_extinf_without_url_is_dropped() {
        let entries = parse("#EXTINF:-1,One\nhttp://a/1.mp4\n#EXTINF:-1,Two\nhttp://a/2.mp4\n#EXTINF:-1,Dangling\n#EXTGRP:x\n");
        assert_eq!(ids(&entries), vec!["vod-1", "vod-2"]);
    }

    #[test]
    fn test_missing_comma_falls_back_to_video_name() {
        let entries = parse("#EXTINF:-1,First\nhttp://a/1.mp4\n#EXTINF:-1\nhttp://a/2.mp4");
        assert_eq!(entries[1].id, "vod-2");
        assert_eq!(entries[1].name, "Video 2");
        assert_eq!(entries[1].description, "Playlist entry 2");
    }

    #[test]
    fn test_blank_title_falls_back_to_video_name() {
        let entries = parse("#EXTINF:-1,   \nhttp://a/1.mp4");
        assert_eq!(entries[0].name, "Video 1");
    }

    #[test]
    fn test_title_is_taken_after_last_comma() {
        let entries = parse(
            "#EXTINF:-1 tvg-name=\"a,b\" group-title=\"Films\",Heat, 1995\nhttp://a/1.mp4",
        );
        assert_eq!(entries[0].name, "1995");
    }

    #[test]
    fn test_crlf_and_bare_cr_line_endings() {
        let crlf = parse("#EXTM3U\r\n#EXTINF:-1,One\r\nhttp://a/1.mp4\r\n#EXTINF:-1,Two\r\nhttp://a/2.mp4\r\n");
        assert_eq!(ids(&crlf), vec!["vod-1", "vod-2"]);
        assert_eq!(crlf[1].url, "http://a/2.mp4");

        let cr = parse("#EXTINF:-1,One\rhttp://a/1.mp4\r");
        assert_eq!(cr.len(), 1);
        assert_eq!(cr[0].url, "http://a/1.mp4");
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let entries = parse("   #EXTINF:-1,  Spaced Out  \n\t http://a/1.mp4  \n");
        assert_eq!(entries[0].name, "Spaced Out");
        assert_eq!(entries[0].url, "http://a/1.mp4");
    }

    #[test]
    fn test_url_without_extinf_is_ignored() {
        let entries = parse("http://a/orphan.mp4\n#EXTINF:-1,One\nhttp://a/1.mp4\nhttp://a/extra.mp4");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "vod-1");
        assert_eq!(entries[0].url, "http://a/1.mp4");
    }

    #[test]
    fn test_consecutive_extinf_keeps_the_latest() {
        let entries = parse("#EXTINF:-1,Lost\n#EXTINF:-1,Kept\nhttp://a/1.mp4\n#EXTINF:-1,Next\nhttp://a/2.mp4");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "vod-1");
        assert_eq!(entries[0].name, "Kept");
        assert_eq!(entries[1].id, "vod-2");
    }

    #[test]
    fn test_extinf_marker_requires_colon() {
        let entries = parse("#EXTINF -1,Nope\nhttp://a/1.mp4");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let entries = parse("\u{feff}#EXTINF:-1,One\nhttp://a/1.mp4");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_ids_are_contiguous_for_n_entries() {
        let mut content = String::from("#EXTM3U\n");
        for i in 1..=25 {
            content.push_str(&format!("#EXTINF:-1,Title {i}\nhttp://host/{i}.mkv\n"));
        }
        let entries = parse(&content);

        assert_eq!(entries.len(), 25);
        for (pos, entry) in entries.iter().enumerate() {
            assert_eq!(entry.id, format!("vod-{}", pos + 1));
            assert_eq!(entry.name, format!("Title {}", pos + 1));
        }
    }

    #[test]
    fn test_garbage_input_yields_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("\u{0}\u{1}binary\u{fffd}junk").is_empty());
        assert!(parse("#EXTM3U\n#EXTINF:-1,Only header").is_empty());
    }
}
