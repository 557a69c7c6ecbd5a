//! Synthetic timing for lyrics that carry no markers.

use crate::document::RawLyricDocument;
use crate::timecode::TimeCode;
use std::fmt::Write;
use tracing::debug;

/// Trailing margin kept free at the end of the media, in seconds.
const TRAILING_MARGIN_SECS: f64 = 0.5;

/// Smallest span lines are spread across, in seconds.
const MIN_USABLE_SECS: f64 = 0.5;

/// Spread lines evenly over `duration_secs`, prefixing each with a
/// `[MM:SS.CC]` marker the parser understands.
///
/// Line `i` of `n` starts at `(i / n) * usable`, where `usable` is the
/// duration minus a half-second margin (never less than half a second), so
/// the first line starts at zero and the last stays short of `usable`.
///
/// Blank input or a duration that is not a positive finite number returns the
/// input with carriage returns stripped and no markers added.
#[must_use]
pub fn synthesize(raw: &str, duration_secs: f64) -> String {
    let document = RawLyricDocument::new(raw);

    if document.is_blank() || !duration_secs.is_finite() || duration_secs <= 0.0 {
        debug!(duration_secs, "Nothing to synthesize, returning lyrics unchanged");
        return document.into_string();
    }

    let lines: Vec<&str> = document.lines().collect();
    let usable = (duration_secs - TRAILING_MARGIN_SECS).max(MIN_USABLE_SECS);

    let mut output = String::new();
    for (index, line) in lines.iter().enumerate() {
        let time = line_start(index, lines.len(), usable);
        // Writing to a String cannot fail
        let _ = writeln!(output, "{}{line}", TimeCode::from_seconds(time));
    }

    debug!(
        lines = lines.len(),
        duration_secs, usable, "Synthesized lyric timings"
    );
    output
}

#[allow(clippy::cast_precision_loss)]
fn line_start(index: usize, count: usize, usable: f64) -> f64 {
    (index as f64 / count as f64) * usable
}
