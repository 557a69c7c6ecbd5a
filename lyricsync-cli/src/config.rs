use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LyricSyncConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to ~/.config/lyricsync/lyricsync.log
    #[serde(default)]
    pub enabled: bool,
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_context_lines")]
    pub lines_before: usize,
    #[serde(default = "default_context_lines")]
    pub lines_after: usize,
}

const fn default_context_lines() -> usize {
    1
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            lines_before: default_context_lines(),
            lines_after: default_context_lines(),
        }
    }
}

impl LyricSyncConfig {
    /// Write the config template if no file exists at `path` yet.
    ///
    /// Returns whether a template was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub fn ensure_template(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, CONFIG_TEMPLATE)?;

        Ok(true)
    }

    /// Load config from `path`, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or has mistyped fields.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

const CONFIG_TEMPLATE: &str = r##"# LyricSync Configuration
# ~/.config/lyricsync/config.toml

[logging]
# Also write logs to ~/.config/lyricsync/lyricsync.log
enabled = false
# Used when RUST_LOG is not set, e.g. "debug" or "lyricsync_core=trace"
filter = "info"

[output]
# Pretty-print JSON produced by `lyricsync parse`
pretty = true

[timeline]
# Lines shown around the current line by `lyricsync at`
lines_before = 1
lines_after = 1
"##;
