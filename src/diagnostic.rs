//! Recoverable anomalies found while parsing or pairing files.
//!
//! A diagnostic never stops processing. Each one is logged through `tracing` when it is
//! recorded and kept on the value being built so callers can inspect or summarize them.

use std::fmt;
use std::path::PathBuf;

/// One recoverable anomaly.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A field carried the wrong tag; its value is left absent.
    MalformedField {
        expected: &'static str,
        found: String,
    },

    /// The first line of a tape had no quoted header.
    MissingHeader { line: String },

    /// A top-level item with a marker we do not know.
    UnrecognizedItem { item: String },

    /// A `((COMMENT` item without a quoted literal.
    UnquotedComment { item: String },

    /// A `(QUOTE` marker with no word before it to attach to, or none after it (empty suffix).
    OrphanQuote { suffix: String },

    /// The exchange part at index 5, which is never collected as a comment.
    SkippedField { part: String },

    /// A `TIMES` field with more than a start and an end.
    ExtraTimes { times: Vec<f64> },

    /// A `TIMES` field whose start is after its end.
    ReversedTimes { start: f64, end: f64 },

    /// An audio file with no caption track.
    UnmatchedAudio { path: PathBuf },

    /// A caption track with no audio file.
    UnmatchedCaptions { path: PathBuf },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedField { expected, found } => {
                write!(f, "invalid format (expected {expected}): {found}")
            }
            Self::MissingHeader { line } => write!(f, "no quoted tape header on line: {line}"),
            Self::UnrecognizedItem { item } => {
                write!(f, "unrecognized data in transcript: {item}")
            }
            Self::UnquotedComment { item } => write!(f, "comment without quoted text: {item}"),
            Self::OrphanQuote { suffix } if suffix.is_empty() => {
                write!(f, "quote marker at the end of the text has nothing to attach")
            }
            Self::OrphanQuote { suffix } => {
                write!(f, "quote marker with no preceding word (suffix '{suffix}')")
            }
            Self::SkippedField { part } => {
                write!(f, "exchange part 5 is not collected as a comment: {part}")
            }
            Self::ExtraTimes { times } => {
                write!(f, "expected 2 time values, got {}: {times:?}", times.len())
            }
            Self::ReversedTimes { start, end } => {
                write!(f, "start time {start} is after end time {end}")
            }
            Self::UnmatchedAudio { path } => {
                write!(f, "no caption track for audio '{}'", path.display())
            }
            Self::UnmatchedCaptions { path } => {
                write!(f, "no audio for caption track '{}'", path.display())
            }
        }
    }
}

/// Log `diagnostic` and append it to `sink`.
pub(crate) fn report(sink: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    tracing::warn!(%diagnostic, "transcript anomaly");
    sink.push(diagnostic);
}
