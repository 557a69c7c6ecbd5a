mod config;
mod error;
mod paths;

use crate::config::{LoggingConfig, LyricSyncConfig};
use crate::error::{CliError, Result};
use clap::{Parser, Subcommand};
use lyricsync_core::{parse, prepare_for_storage, synthesize, TimeCode, Timeline};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Parse and synthesize inline lyric time-codes
#[derive(Debug, Parser)]
#[command(name = "lyricsync", version, about)]
struct Cli {
    /// Config file to use instead of ~/.config/lyricsync/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print lyrics as a JSON list of { time, text } entries
    Parse {
        /// Lyrics file, or "-" for stdin
        input: PathBuf,
    },
    /// Add evenly spread time-codes to plain lyrics
    Synthesize {
        /// Lyrics file, or "-" for stdin
        input: PathBuf,
        /// Media duration in seconds
        #[arg(long)]
        duration: f64,
    },
    /// Print the lyric text that would be stored for a media item
    Ingest {
        /// Lyrics file, or "-" for stdin
        input: PathBuf,
        /// Media duration in seconds, when known
        #[arg(long)]
        duration: Option<f64>,
    },
    /// Show the lines around a playback position
    At {
        /// Lyrics file, or "-" for stdin
        input: PathBuf,
        /// Playback position in seconds
        #[arg(long)]
        position: f64,
        /// Media duration in seconds, used to time unsynced lyrics
        #[arg(long)]
        duration: Option<f64>,
        /// Lines shown before the current one
        #[arg(long)]
        before: Option<usize>,
        /// Lines shown after the current one
        #[arg(long)]
        after: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(paths::config_path);
    let template_written = if cli.config.is_none() {
        LyricSyncConfig::ensure_template(&config_path)
    } else {
        Ok(false)
    };

    let config = match LyricSyncConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            error!("{}: {e}", config_path.display());
            std::process::exit(1);
        }
    };
    init_tracing(&config.logging);

    match template_written {
        Ok(true) => info!("Wrote default config to {}", config_path.display()),
        Ok(false) => debug!("Using config at {}", config_path.display()),
        Err(e) => debug!("Could not write config template: {e}"),
    }

    if let Err(e) = run(cli.command, &config) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command, config: &LyricSyncConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Parse { input } => {
            let result = parse(&read_input(&input)?);
            info!(
                "Parsed {} line(s), {}",
                result.len(),
                if result.is_synced() { "synced" } else { "unsynced" }
            );

            if config.output.pretty {
                serde_json::to_writer_pretty(&mut out, &result)?;
            } else {
                serde_json::to_writer(&mut out, &result)?;
            }
            writeln!(out)?;
        }
        Command::Synthesize { input, duration } => {
            let lyrics = read_input(&input)?;
            write!(out, "{}", synthesize(&lyrics, duration))?;
        }
        Command::Ingest { input, duration } => {
            let lyrics = read_input(&input)?;
            match prepare_for_storage(&lyrics, duration) {
                Some(stored) => write!(out, "{stored}")?,
                None => info!("Nothing to store"),
            }
        }
        Command::At {
            input,
            position,
            duration,
            before,
            after,
        } => {
            let position = Duration::try_from_secs_f64(position)
                .map_err(|_| CliError::InvalidPosition { value: position })?;
            let timeline = Timeline::new(parse(&read_input(&input)?), duration);
            let before = before.unwrap_or(config.timeline.lines_before);
            let after = after.unwrap_or(config.timeline.lines_after);

            let current = timeline.current_line(position);
            for line in timeline.visible_lines(position, before, after) {
                let pointer = if current.is_some_and(|c| std::ptr::eq(c, line)) {
                    '>'
                } else {
                    ' '
                };
                let stamp = line.time.map_or_else(
                    || "[--:--.--]".to_string(),
                    |t| TimeCode::from_seconds(t).to_string(),
                );
                writeln!(out, "{pointer} {stamp} {}", line.text)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Read lyric text from a file, or stdin when the path is "-"
fn read_input(path: &Path) -> Result<String> {
    let read = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(path)
    };

    read.map_err(|source| CliError::InputRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Initialize tracing with stderr output and optional file logging
fn init_tracing(logging: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    if logging.enabled {
        let log_path = paths::log_file_path();

        // Create the log file's parent directory before opening it
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match File::create(&log_path) {
            Ok(file) => {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .with(file_layer)
                    .init();

                return;
            }
            Err(e) => {
                eprintln!("Failed to create log file at {}: {e}", log_path.display());
            }
        }
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["lyricsync", "synthesize", "song.txt", "--duration", "90.5"])
            .unwrap();
        match cli.command {
            Command::Synthesize { input, duration } => {
                assert_eq!(input, PathBuf::from("song.txt"));
                assert!((duration - 90.5).abs() < f64::EPSILON);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["lyricsync", "ingest", "-"]).unwrap();
        assert!(matches!(cli.command, Command::Ingest { duration: None, .. }));
    }

    #[test]
    fn test_cli_requires_duration_for_synthesize() {
        assert!(Cli::try_parse_from(["lyricsync", "synthesize", "song.txt"]).is_err());
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Path::new("/nonexistent/lyricsync/lyrics.txt")).unwrap_err();
        assert!(matches!(err, CliError::InputRead { .. }));
    }
}
