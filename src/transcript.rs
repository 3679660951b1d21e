//! A whole tape: header, tape-level comments, exchanges and tail note.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::caption::Caption;
use crate::caption_encoder::CaptionEncoder;
use crate::diagnostic::{Diagnostic, report};
use crate::error::{Error, Result};
use crate::exchange::Exchange;
use crate::output_type::OutputType;
use crate::tokenizer;
use crate::vtt_encoder::VttEncoder;

const COMMENT_MARKER: &str = "((COMMENT";
const EXCHANGE_MARKER: &str = "((FROM";
const TAIL_MARKER: &str = "((TAPE-TAIL";

/// One parsed tape.
///
/// Serializes as the full tape record (header, comments, exchanges with their routing fields,
/// tail); the source path and diagnostics are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    /// Where the tape was read from, if it came from a file.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,

    /// Quoted note on the first line.
    pub header: String,

    /// Tape-level `((COMMENT "..."))` items.
    pub comments: Vec<String>,

    /// Exchanges in input order.
    pub exchanges: Vec<Exchange>,

    /// The `((TAPE-TAIL ..))` note.
    pub tail: String,

    /// Everything that looked wrong but did not stop parsing.
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Transcript {
    /// Parse the full text of a tape file.
    pub fn parse(content: &str) -> Result<Self> {
        let mut transcript = Self::default();

        let mut lines = content.split_inclusive('\n');
        let header_line = lines.next().unwrap_or_default();
        match first_quoted(header_line) {
            Some(header) => transcript.header = header.to_owned(),
            None => report(
                &mut transcript.diagnostics,
                Diagnostic::MissingHeader {
                    line: header_line.trim_end().to_owned(),
                },
            ),
        }

        let body: String = lines.filter(|line| !line.starts_with(';')).collect();

        for item in tokenizer::items(&body)? {
            if item.starts_with(COMMENT_MARKER) {
                match first_quoted(item) {
                    Some(comment) => transcript.comments.push(comment.to_owned()),
                    None => report(
                        &mut transcript.diagnostics,
                        Diagnostic::UnquotedComment {
                            item: item.to_owned(),
                        },
                    ),
                }
            } else if item.starts_with(EXCHANGE_MARKER) {
                let (exchange, diagnostics) = Exchange::parse(item)?;
                transcript.diagnostics.extend(diagnostics);
                transcript.exchanges.push(exchange);
            } else if item.starts_with(TAIL_MARKER) {
                transcript.tail = tail_text(item);
            } else {
                report(
                    &mut transcript.diagnostics,
                    Diagnostic::UnrecognizedItem {
                        item: item.to_owned(),
                    },
                );
            }
        }

        Ok(transcript)
    }

    /// Read and parse a tape file. Errors carry the file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "parsing");

        let content = fs::read_to_string(path).map_err(|e| Error::from(e).in_file(path))?;
        let mut transcript = Self::parse(&content).map_err(|e| e.in_file(path))?;
        transcript.source_path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            exchanges = transcript.exchanges.len(),
            diagnostics = transcript.diagnostics.len(),
            "parsed"
        );

        Ok(transcript)
    }

    /// Caption projection of every exchange, in order.
    pub fn captions(&self) -> impl Iterator<Item = Caption> + '_ {
        self.exchanges.iter().map(Caption::from)
    }

    /// Render the tape as a WebVTT document.
    pub fn to_vtt(&self) -> Result<String> {
        let mut out = Vec::new();
        self.write_vtt(VttEncoder::new(&mut out))?;
        String::from_utf8(out).map_err(|e| Error::msg(e.to_string()))
    }

    /// Write the tape to `w` in the requested format.
    ///
    /// WebVTT carries only what a caption track can: the header and tail as `NOTE` blocks and
    /// one cue per exchange. JSON is the whole tape record, including each exchange's source,
    /// destination, sequence, every `TIMES` value and comments.
    pub fn write_captions<W: Write>(&self, mut w: W, output_type: OutputType) -> Result<()> {
        match output_type {
            OutputType::Vtt => self.write_vtt(VttEncoder::new(w)),
            OutputType::Json => {
                serde_json::to_writer_pretty(&mut w, self)?;
                w.write_all(b"\n")?;
                w.flush()?;
                Ok(())
            }
        }
    }

    fn write_vtt<W: Write>(&self, mut encoder: VttEncoder<W>) -> Result<()> {
        encoder.write_note(&self.header)?;
        for caption in self.captions() {
            encoder.write_caption(&caption)?;
        }
        encoder.write_note(&self.tail)?;
        encoder.close()
    }
}

/// Text between the first and second `"` (or to the end if there is only one).
fn first_quoted(s: &str) -> Option<&str> {
    s.split('"').nth(1)
}

fn tail_text(item: &str) -> String {
    match first_quoted(item) {
        Some(tail) => tail.to_owned(),
        None => item
            .split("TAPE-TAIL")
            .nth(1)
            .unwrap_or_default()
            .trim()
            .replace(')', ""),
    }
}
