//! Preparing user-supplied lyrics before they are persisted.

use crate::generator::synthesize;
use crate::timecode::has_marker;
use tracing::{debug, info};

/// Decide what lyric text should be stored for a media item.
///
/// Returns `None` when there is nothing worth storing. Text that already
/// carries markers is kept as-is. Otherwise, when the media duration is
/// known, synthetic markers are added so a later [`parse`](crate::parse)
/// yields a synced result.
#[must_use]
pub fn prepare_for_storage(raw: &str, duration_secs: Option<f64>) -> Option<String> {
    let content = raw.trim();
    if content.is_empty() {
        debug!("No lyric content to store");
        return None;
    }

    if has_marker(content) {
        debug!("Lyrics already carry time-codes, storing verbatim");
        return Some(content.to_string());
    }

    let Some(duration_secs) = duration_secs else {
        debug!("Media duration unknown, storing lyrics without timings");
        return Some(content.to_string());
    };

    let synthesized = synthesize(content, duration_secs);
    if synthesized.trim().is_empty() {
        return Some(content.to_string());
    }

    info!(duration_secs, "Generated synthetic lyric timings");
    Some(synthesized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_blank_lyrics_not_stored() {
        assert_eq!(prepare_for_storage("", Some(100.0)), None);
        assert_eq!(prepare_for_storage(" \r\n\t ", None), None);
    }

    #[test]
    fn test_unknown_duration_stores_trimmed_text() {
        assert_eq!(
            prepare_for_storage("\n  line one\nline two  \n", None).as_deref(),
            Some("line one\nline two")
        );
    }

    #[test]
    fn test_known_duration_synthesizes() {
        let stored = prepare_for_storage("one\ntwo", Some(20.5)).unwrap();
        assert_eq!(stored, "[00:00.00]one\n[00:10.00]two\n");
        assert!(parse(&stored).is_synced());
    }

    #[test]
    fn test_existing_markers_kept() {
        let raw = "[00:03.00]already\nsynced";
        assert_eq!(prepare_for_storage(raw, Some(60.0)).as_deref(), Some(raw));
    }

    #[test]
    fn test_zero_duration_keeps_text() {
        assert_eq!(
            prepare_for_storage("words", Some(0.0)).as_deref(),
            Some("words")
        );
    }
}
