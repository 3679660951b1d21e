//! A single radio transmission and its parser.

use serde::Serialize;

use crate::diagnostic::{Diagnostic, report};
use crate::error::{Error, Result};
use crate::tokenizer::next_field;

/// Sequence value used when an exchange has no `NUM` field.
pub const NO_SEQUENCE: &str = "none";

/// Marker word that turns the following word into an apostrophe suffix of the word before it.
const QUOTE_MARKER: &str = "(QUOTE";

/// Trailing comments are collected from this part index on. The part before it is never read as
/// a comment.
const FIRST_COMMENT_PART: usize = 6;

/// One radio transmission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exchange {
    /// Speaker or station; `None` if the `FROM` field was malformed.
    pub source: Option<String>,

    /// The `NUM` field, or [`NO_SEQUENCE`].
    pub sequence: String,

    /// Addressee; `None` if the `TO` field was malformed.
    pub destination: Option<String>,

    /// Normalized utterance text.
    pub text: String,

    /// Start and end in seconds. Always at least two finite, non-negative values; anything after
    /// the first two is kept in the JSON record but never becomes part of a caption.
    pub times: Vec<f64>,

    pub comments: Vec<String>,
}

impl Exchange {
    /// Parse one `((FROM ..) ..)` item.
    ///
    /// Recoverable problems come back as diagnostics next to the exchange. A malformed `TEXT` or
    /// `TIMES` field, or unbalanced parentheses, is an error.
    pub fn parse(raw: &str) -> Result<(Self, Vec<Diagnostic>)> {
        let mut diagnostics = Vec::new();
        let mut parts = split_parts(raw)?;

        let source = optional_field(&parts, 0, "FROM", &mut diagnostics);

        let sequence = match field_body(part(&parts, 1), "NUM") {
            Some(num) => num.to_owned(),
            None => {
                // NUM is optional; keep TO/TEXT/TIMES at their usual positions.
                parts.insert(parts.len().min(1), "");
                NO_SEQUENCE.to_owned()
            }
        };

        let destination = optional_field(&parts, 2, "TO", &mut diagnostics);

        let text = required_field(&parts, 3, "TEXT")?;
        let text = normalize_text(text, &mut diagnostics);

        let times = parse_times(required_field(&parts, 4, "TIMES")?)?;
        match times.as_slice() {
            [_, _] => {}
            _ => report(
                &mut diagnostics,
                Diagnostic::ExtraTimes {
                    times: times.clone(),
                },
            ),
        }
        if times[0] > times[1] {
            report(
                &mut diagnostics,
                Diagnostic::ReversedTimes {
                    start: times[0],
                    end: times[1],
                },
            );
        }

        if let Some(skipped) = parts.get(FIRST_COMMENT_PART - 1).filter(|p| !p.is_empty()) {
            report(
                &mut diagnostics,
                Diagnostic::SkippedField {
                    part: (*skipped).to_owned(),
                },
            );
        }

        let mut comments = Vec::new();
        for part in parts.iter().skip(FIRST_COMMENT_PART) {
            match field_body(part, "COMMENT") {
                Some(comment) => comments.push(comment.to_owned()),
                None => report(
                    &mut diagnostics,
                    Diagnostic::MalformedField {
                        expected: "COMMENT",
                        found: (*part).to_owned(),
                    },
                ),
            }
        }

        let exchange = Self {
            source,
            sequence,
            destination,
            text,
            times,
            comments,
        };

        Ok((exchange, diagnostics))
    }

    /// Start of the transmission, in seconds.
    pub fn start(&self) -> f64 {
        self.times[0]
    }

    /// End of the transmission, in seconds.
    pub fn end(&self) -> f64 {
        self.times[1]
    }
}

/// Split the interior of an exchange item into its fields.
fn split_parts(raw: &str) -> Result<Vec<&str>> {
    let mut rest = raw.strip_prefix('(').unwrap_or(raw);
    let mut parts = Vec::new();

    while !matches!(rest.trim(), "" | ")") {
        let Some((part, remainder)) = next_field(rest)? else {
            break;
        };
        parts.push(part);
        rest = remainder;
    }

    Ok(parts)
}

fn part<'a>(parts: &[&'a str], index: usize) -> &'a str {
    parts.get(index).copied().unwrap_or_default()
}

/// The body of a `(TAG body)` field: one trailing `)` removed, whitespace trimmed.
///
/// The tag must be followed by whitespace, `)` or nothing, so `(TOWER ..)` is not a `TO` field.
fn field_body<'a>(part: &'a str, tag: &str) -> Option<&'a str> {
    let rest = part.strip_prefix('(')?.strip_prefix(tag)?;
    if !rest.is_empty() && !rest.starts_with(|c: char| c.is_whitespace() || c == ')') {
        return None;
    }
    Some(rest.strip_suffix(')').unwrap_or(rest).trim())
}

fn optional_field(
    parts: &[&str],
    index: usize,
    tag: &'static str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    let found = part(parts, index);
    match field_body(found, tag) {
        Some(body) => Some(body.to_owned()),
        None => {
            report(
                diagnostics,
                Diagnostic::MalformedField {
                    expected: tag,
                    found: found.to_owned(),
                },
            );
            None
        }
    }
}

fn required_field<'a>(parts: &[&'a str], index: usize, tag: &'static str) -> Result<&'a str> {
    let found = part(parts, index);
    field_body(found, tag).ok_or_else(|| Error::MalformedField {
        expected: tag,
        found: found.to_owned(),
    })
}

/// Parse a `TIMES` body. At least a start and an end are required, and every value must be a
/// finite, non-negative number of seconds.
fn parse_times(body: &str) -> Result<Vec<f64>> {
    let times = body
        .split_whitespace()
        .map(|token| match token.parse::<f64>() {
            Ok(time) if time.is_finite() && time >= 0.0 => Ok(time),
            _ => Err(Error::InvalidTime {
                token: token.to_owned(),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    if times.len() < 2 {
        return Err(Error::MissingTimes { found: times.len() });
    }

    Ok(times)
}

/// Normalize the body of a `TEXT` field.
///
/// - `word (QUOTE suffix)` becomes `word'suffix`
/// - words made only of `)` are dropped
/// - words are joined by single spaces, so newlines and runs of spaces disappear
/// - the first character is upper-cased and everything else lower-cased
pub fn normalize_text(raw: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut quote_next = false;

    for word in raw.split_whitespace() {
        if quote_next {
            quote_next = false;
            let suffix = word.strip_suffix(')').unwrap_or(word);
            match words.last_mut() {
                Some(previous) => {
                    previous.push('\'');
                    previous.push_str(suffix);
                }
                None => {
                    report(
                        diagnostics,
                        Diagnostic::OrphanQuote {
                            suffix: suffix.to_owned(),
                        },
                    );
                    words.push(format!("'{suffix}"));
                }
            }
            continue;
        }

        if word == QUOTE_MARKER {
            quote_next = true;
        } else if !word.chars().all(|c| c == ')') {
            words.push(word.to_owned());
        }
    }

    if quote_next {
        report(
            diagnostics,
            Diagnostic::OrphanQuote {
                suffix: String::new(),
            },
        );
    }

    capitalize(&words.join(" "))
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
