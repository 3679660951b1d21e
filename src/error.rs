use std::path::PathBuf;

use thiserror::Error;

/// The crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The crate-wide error type.
///
/// Everything in here is fatal for the file (or tape) being processed. Anomalies that parsing
/// can recover from are reported as [`crate::diagnostic::Diagnostic`]s instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Parenthesis depth never returned to zero before the input ran out.
    #[error("unbalanced parentheses: input ended at depth {depth}")]
    Unbalanced { depth: i64 },

    /// A required field had the wrong (or no) tag.
    #[error("invalid format (expected {expected}): {found}")]
    MalformedField { expected: &'static str, found: String },

    /// A `TIMES` token that is not a number.
    #[error("invalid time value '{token}'")]
    InvalidTime { token: String },

    /// A `TIMES` field without both a start and an end.
    #[error("expected a start and an end time, got {found} value(s)")]
    MissingTimes { found: usize },

    /// A caption-track timestamp that is not `H:MM:SS.mmm`.
    #[error("invalid caption timestamp '{value}'")]
    InvalidTimestamp { value: String },

    /// Segmentation was asked to run before any caption tracks were produced.
    #[error("no caption tracks found in '{}'; convert the transcripts first", dir.display())]
    NoCaptionTracks { dir: PathBuf },

    /// Decoding or encoding audio failed.
    #[error("audio: {0}")]
    Audio(String),

    /// Any error, tagged with the file it happened in.
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Attach the path of the file being processed.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            already @ Self::File { .. } => already,
            other => Self::File {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Audio(format!("{err:#}"))
    }
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) => Self::Io(io),
            other => Self::Audio(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_file_wraps_once() {
        let err = Error::msg("boom").in_file("a.txt").in_file("b.txt");
        match &err {
            Error::File { path, source } => {
                assert_eq!(path, &PathBuf::from("a.txt"));
                assert!(matches!(**source, Error::Message(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "a.txt: boom");
    }

    #[test]
    fn malformed_field_names_the_expected_tag() {
        let err = Error::MalformedField {
            expected: "TEXT",
            found: "(TIMES 1 2)".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid format (expected TEXT): (TIMES 1 2)");
    }
}
