//! Lyric synchronization: parsing inline `[MM:SS.fff]` time-codes and
//! synthesizing them for plain lyrics with a known media duration.
//!
//! Everything here is pure and synchronous. Nothing fails: malformed markers
//! are skipped and degenerate input falls back to a well-defined result.

pub mod document;
pub mod generator;
pub mod ingest;
pub mod parser;
pub mod timecode;
pub mod timeline;

pub use document::RawLyricDocument;
pub use generator::synthesize;
pub use ingest::prepare_for_storage;
pub use parser::{parse, LyricLine, ParseResult};
pub use timecode::{find_markers, Marker, TimeCode};
pub use timeline::Timeline;
