//! Playback-side view of parsed lyrics.

use crate::parser::{LyricLine, ParseResult};
use std::time::Duration;

/// Assumed length of the last timed line when nothing follows it.
const DEFAULT_LINE_SECS: f64 = 5.0;

/// Parsed lines ready to be followed during playback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    lines: Vec<LyricLine>,
    synced: bool,
}

impl Timeline {
    /// Build a timeline from a parse result.
    ///
    /// Unsynced lyrics get times proportional to `duration_secs` when it is a
    /// positive finite number: line `i` of `n` starts at `(i / n) * duration`.
    #[must_use]
    pub fn new(result: ParseResult, duration_secs: Option<f64>) -> Self {
        match result {
            ParseResult::Synced(lines) => Self {
                lines,
                synced: true,
            },
            ParseResult::Unsynced(mut lines) => {
                if let Some(duration) = duration_secs.filter(|d| d.is_finite() && *d > 0.0) {
                    let count = lines.len();
                    for (index, line) in lines.iter_mut().enumerate() {
                        line.time = Some(proportional_start(index, count, duration));
                    }
                }
                Self {
                    lines,
                    synced: false,
                }
            }
        }
    }

    /// Whether the times came from inline markers rather than the fallback.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    #[must_use]
    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    /// Find the current line for a given playback position
    #[must_use]
    pub fn current_line(&self, position: Duration) -> Option<&LyricLine> {
        self.current_line_index(position).map(|i| &self.lines[i])
    }

    /// Index of the last timed line starting at or before `position`.
    #[must_use]
    pub fn current_line_index(&self, position: Duration) -> Option<usize> {
        let position = position.as_secs_f64();
        self.lines
            .iter()
            .enumerate()
            .rev()
            .find(|(_, line)| line.time.is_some_and(|t| t <= position))
            .map(|(i, _)| i)
    }

    /// Get lines around the current position for display
    #[must_use]
    pub fn visible_lines(&self, position: Duration, before: usize, after: usize) -> &[LyricLine] {
        if self.lines.is_empty() {
            return &[];
        }

        let current_idx = self.current_line_index(position).unwrap_or(0);
        let start = current_idx.saturating_sub(before);
        let end = current_idx
            .saturating_add(after)
            .saturating_add(1)
            .min(self.lines.len());

        &self.lines[start..end]
    }

    /// Progress through the line at `index`, from 0.0 to 1.0.
    ///
    /// The line ends where the next timed line starts, or after a default
    /// five seconds for the last one. Timeless lines report 0.0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress(&self, index: usize, position: Duration) -> f32 {
        let Some(start) = self.lines.get(index).and_then(|line| line.time) else {
            return 0.0;
        };
        let position = position.as_secs_f64();
        if position < start {
            return 0.0;
        }

        let end = self.lines[index + 1..]
            .iter()
            .find_map(|line| line.time.filter(|t| *t > start))
            .unwrap_or(start + DEFAULT_LINE_SECS);

        if position >= end {
            return 1.0;
        }

        ((position - start) / (end - start)).clamp(0.0, 1.0) as f32
    }
}

#[allow(clippy::cast_precision_loss)]
fn proportional_start(index: usize, count: usize, duration: f64) -> f64 {
    (index as f64 / count as f64) * duration
}
