//! Inline time-code markers: `[MM:SS]` and `[MM:SS.fff]`.
//!
//! The grammar bounds digit counts only: one or two minute digits, exactly two
//! second digits, and an optional fraction of one to three digits. Digit
//! values are never range-checked, so `[99:99]` converts to 6039 seconds.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

#[allow(clippy::expect_used)]
static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d{1,2}):(\d{2})(?:\.(\d{1,3}))?\]").expect("marker pattern must compile")
});

/// One parsed inline marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeCode {
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

/// A marker found in a line: its byte span and, when its digits converted,
/// the time code it denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub start: usize,
    pub end: usize,
    pub time_code: Option<TimeCode>,
}

impl TimeCode {
    /// Build a time code from the textual groups of a marker.
    ///
    /// The fraction scale depends on how many digits were written: one digit
    /// is tenths, two are hundredths, anything else is taken as milliseconds.
    /// Returns `None` when minutes or seconds are not plain ASCII integers. A
    /// fraction that does not convert counts as zero milliseconds.
    #[must_use]
    pub fn from_parts(minutes: &str, seconds: &str, fraction: Option<&str>) -> Option<Self> {
        let minutes = minutes.parse::<u32>().ok()?;
        let seconds = seconds.parse::<u32>().ok()?;
        let millis = fraction
            .and_then(|digits| {
                let value = digits.parse::<u32>().ok()?;
                Some(match digits.len() {
                    1 => value * 100,
                    2 => value * 10,
                    _ => value,
                })
            })
            .unwrap_or(0);

        Some(Self {
            minutes,
            seconds,
            millis,
        })
    }

    /// Time code for a non-negative number of seconds, truncated (never
    /// rounded) to whole centiseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_seconds(total: f64) -> Self {
        let total = total.max(0.0);
        let minutes = (total / 60.0) as u32;
        let seconds = (total % 60.0) as u32;
        let centis = ((total - total.floor()) * 100.0) as u32;

        Self {
            minutes,
            seconds,
            millis: centis * 10,
        }
    }

    /// Total seconds: `minutes * 60 + seconds + millis / 1000`.
    #[must_use]
    pub fn as_seconds(&self) -> f64 {
        f64::from(self.minutes) * 60.0 + f64::from(self.seconds) + f64::from(self.millis) / 1000.0
    }
}

/// Renders the generator's marker form, `[MM:SS.CC]`.
impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:02}:{:02}.{:02}]",
            self.minutes,
            self.seconds,
            self.millis / 10
        )
    }
}

/// All non-overlapping markers in `line`, scanned left to right.
#[must_use]
pub fn find_markers(line: &str) -> Vec<Marker> {
    MARKER_REGEX
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let time_code = TimeCode::from_parts(
                caps.get(1)?.as_str(),
                caps.get(2)?.as_str(),
                caps.get(3).as_ref().map(regex::Match::as_str),
            );
            Some(Marker {
                start: whole.start(),
                end: whole.end(),
                time_code,
            })
        })
        .collect()
}

/// Whether `line` contains at least one marker.
#[must_use]
pub fn has_marker(line: &str) -> bool {
    MARKER_REGEX.is_match(line)
}
