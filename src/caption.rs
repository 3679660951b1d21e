//! Caption records and the caption-track reader.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::exchange::Exchange;

/// The `(text, start, end)` projection of an exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Caption {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

impl From<&Exchange> for Caption {
    fn from(exchange: &Exchange) -> Self {
        Self::new(exchange.text.clone(), exchange.start(), exchange.end())
    }
}

/// Parse a caption-track timestamp (`H:MM:SS.mmm`) into seconds.
pub fn parse_vtt_time(value: &str) -> Result<f64> {
    let invalid = || Error::InvalidTimestamp {
        value: value.to_owned(),
    };

    let mut parts = value.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let hours: u64 = hours.parse().map_err(|_| invalid())?;
    let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: f64 = seconds.parse().map_err(|_| invalid())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid());
    }

    let whole = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .ok_or_else(invalid)?;

    Ok(whole as f64 + seconds)
}

/// Read captions back out of a caption track.
///
/// Only the fixed shape we write is understood: a timing line containing `-->`, followed by
/// exactly one text line. `WEBVTT`, `NOTE` blocks and blank lines are skipped.
pub fn read_captions(content: &str) -> Result<Vec<Caption>> {
    let mut captions = Vec::new();
    let mut pending: Option<(f64, f64)> = None;

    for line in content.lines().map(str::trim) {
        if let Some((start, end)) = pending.take() {
            captions.push(Caption::new(line, start, end));
            continue;
        }

        if line.contains("-->") {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let (Some(start), Some(end)) = (tokens.first(), tokens.get(2)) else {
                return Err(Error::InvalidTimestamp {
                    value: line.to_owned(),
                });
            };
            pending = Some((parse_vtt_time(start)?, parse_vtt_time(end)?));
        }
    }

    Ok(captions)
}

/// Read a caption-track file. Errors carry the file path.
pub fn read_captions_file(path: impl AsRef<Path>) -> Result<Vec<Caption>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::from(e).in_file(path))?;
    read_captions(&content).map_err(|e| e.in_file(path))
}
