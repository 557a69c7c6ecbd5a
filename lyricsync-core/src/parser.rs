//! Parsing lyric text into time-ordered lines.

use crate::document::RawLyricDocument;
use crate::timecode::find_markers;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// One entry of a parsed lyric document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricLine {
    /// Seconds from the start of the media; `None` when no time is known.
    pub time: Option<f64>,
    pub text: String,
}

/// Parsed lyrics, classified by whether any inline marker was found.
///
/// Serializes as a plain list of `{ "time", "text" }` objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParseResult {
    /// At least one marker was present; lines are ordered by time with
    /// timeless lines first.
    Synced(Vec<LyricLine>),
    /// No markers anywhere; lines keep document order and have no times.
    Unsynced(Vec<LyricLine>),
}

impl LyricLine {
    #[must_use]
    pub fn new(time: Option<f64>, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

impl ParseResult {
    #[must_use]
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced(_))
    }

    #[must_use]
    pub fn lines(&self) -> &[LyricLine] {
        match self {
            Self::Synced(lines) | Self::Unsynced(lines) => lines,
        }
    }

    #[must_use]
    pub fn into_lines(self) -> Vec<LyricLine> {
        match self {
            Self::Synced(lines) | Self::Unsynced(lines) => lines,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }
}

/// Parse lyric text that may carry inline `[MM:SS.fff]` markers.
///
/// Every marker on a line produces its own entry, all sharing the text that
/// follows the line's last marker. Markers whose digits do not convert are
/// skipped without affecting the rest of the line.
#[must_use]
pub fn parse(raw: &str) -> ParseResult {
    let document = RawLyricDocument::new(raw);
    let mut entries = Vec::new();
    let mut synced = false;

    for line in document.lines() {
        let markers = find_markers(line);
        let Some(last) = markers.last() else {
            entries.push(LyricLine::new(None, line));
            continue;
        };

        synced = true;
        let text = line[last.end..].trim();

        for marker in &markers {
            match marker.time_code {
                Some(time_code) => entries.push(LyricLine::new(Some(time_code.as_seconds()), text)),
                None => debug!(
                    "Skipping unconvertible marker {:?}",
                    &line[marker.start..marker.end]
                ),
            }
        }
    }

    trace!(entries = entries.len(), synced, "Parsed lyric document");

    if !synced {
        return ParseResult::Unsynced(entries);
    }

    // Vec::sort_by is stable: equal times keep emission order
    entries.sort_by(|a, b| compare_times(a.time, b.time));
    ParseResult::Synced(entries)
}

/// Ascending by time, absent times before all present ones.
fn compare_times(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_time(line: &LyricLine, expected: f64) {
        let time = line.time.unwrap();
        assert!(
            (time - expected).abs() < 1e-9,
            "expected {expected}, got {time}"
        );
    }

    #[test]
    fn test_parse_simple_line() {
        let result = parse("[00:12.34]Hello world");
        assert!(result.is_synced());
        assert_eq!(result.len(), 1);
        assert_time(&result.lines()[0], 12.34);
        assert_eq!(result.lines()[0].text, "Hello world");
    }

    #[test]
    fn test_no_markers_is_unsynced() {
        let result = parse("  First line \n\nSecond line\r\n   \nThird");
        assert!(!result.is_synced());
        let lines = result.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], LyricLine::new(None, "First line"));
        assert_eq!(lines[1], LyricLine::new(None, "Second line"));
        assert_eq!(lines[2], LyricLine::new(None, "Third"));
    }

    #[test]
    fn test_multi_marker_fan_out() {
        let result = parse("[00:01.00][00:02.00]hello");
        let lines = result.lines();
        assert_eq!(lines.len(), 2);
        assert_time(&lines[0], 1.0);
        assert_time(&lines[1], 2.0);
        assert!(lines.iter().all(|l| l.text == "hello"));
    }

    #[test]
    fn test_text_follows_last_marker() {
        let result = parse("lead [00:03] middle [00:01]  tail  ");
        let lines = result.lines();
        assert_eq!(lines.len(), 2);
        assert_time(&lines[0], 1.0);
        assert_time(&lines[1], 3.0);
        assert!(lines.iter().all(|l| l.text == "tail"));
    }

    #[test]
    fn test_marker_without_text() {
        let result = parse("[00:05.00]\n[00:06.00]words");
        let lines = result.lines();
        assert_eq!(lines[0].text, "");
        assert_eq!(lines[1].text, "words");
    }

    #[test]
    fn test_mixed_scenario_places_timeless_first() {
        let result = parse("[01:02.30]First line\nSecond line\n[01:05]Third");
        assert!(result.is_synced());
        let lines = result.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], LyricLine::new(None, "Second line"));
        assert_time(&lines[1], 62.3);
        assert_eq!(lines[1].text, "First line");
        assert_time(&lines[2], 65.0);
        assert_eq!(lines[2].text, "Third");
    }

    #[test]
    fn test_sorted_ascending() {
        let input = "[00:15.00]Third\n[00:05.00]First\n[00:10.00]Second";
        let result = parse(input);
        let texts: Vec<_> = result.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_equal_times_keep_emission_order() {
        let input = "[00:10.00]alpha\n[00:05.00]early\n[00:10.0]beta\n[00:10.000]gamma";
        let result = parse(input);
        let texts: Vec<_> = result.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["early", "alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_timeless_lines_keep_relative_order() {
        let input = "one\n[00:01]timed\ntwo\nthree";
        let result = parse(input);
        let texts: Vec<_> = result.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three", "timed"]);
    }

    #[test]
    fn test_unconvertible_marker_skipped() {
        let result = parse("[٠١:٢٣][00:04]words\nplain");
        assert!(result.is_synced());
        let lines = result.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], LyricLine::new(None, "plain"));
        assert_time(&lines[1], 4.0);
        assert_eq!(lines[1].text, "words");
    }

    #[test]
    fn test_only_unconvertible_markers_still_synced() {
        let result = parse("[٠١:٢٣]words\nplain");
        assert!(result.is_synced());
        assert_eq!(result.lines(), &[LyricLine::new(None, "plain")]);
    }

    #[test]
    fn test_unconvertible_fraction_keeps_line() {
        let result = parse("[00:01.٥]hi");
        assert!(result.is_synced());
        assert_eq!(result.lines(), &[LyricLine::new(Some(1.0), "hi")]);
    }

    #[test]
    fn test_large_minutes_not_validated() {
        let result = parse("[99:99]late");
        assert_time(&result.lines()[0], 6039.0);
    }

    #[test]
    fn test_id_tags_are_plain_text() {
        let result = parse("[ti:Song Title]\n[00:01]go");
        assert_eq!(result.lines()[0], LyricLine::new(None, "[ti:Song Title]"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), ParseResult::Unsynced(Vec::new()));
        assert_eq!(parse(" \r\n\t\n "), ParseResult::Unsynced(Vec::new()));
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_cjk_text() {
        let result = parse("[00:05.00]你好世界");
        assert_eq!(result.lines()[0].text, "你好世界");
    }

    #[test]
    fn test_serializes_as_time_text_list() {
        let json = serde_json::to_value(parse("[00:01.50]hi\nbye")).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "time": null, "text": "bye" },
                { "time": 1.5, "text": "hi" }
            ])
        );

        let json = serde_json::to_value(parse("")).unwrap();
        assert_eq!(json, serde_json::json!([]));
    }
}
