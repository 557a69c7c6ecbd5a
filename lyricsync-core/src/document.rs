//! Normalization of raw lyric text.

/// Unparsed lyric text with carriage returns removed.
///
/// Lines are split on `\n`, trimmed, and empty lines are dropped. Both the
/// parser and the generator see exactly the same sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLyricDocument {
    content: String,
}

impl RawLyricDocument {
    /// Strip every `\r` from `raw`, including ones in the middle of a line.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            content: raw.replace('\r', ""),
        }
    }

    /// The text with carriage returns removed but otherwise untouched.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Trimmed, non-empty lines in their original order.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.content
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    /// Whether the document has no non-empty lines.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.lines().next().is_none()
    }

    /// Consume the document, returning the text with carriage returns removed.
    #[must_use]
    pub fn into_string(self) -> String {
        self.content
    }
}
