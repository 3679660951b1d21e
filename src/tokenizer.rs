//! Balanced-parenthesis tokenizers for the tape notation.
//!
//! There is no grammar here. A tape body is a run of top-level parenthesized items, and an
//! exchange item is a run of adjacent parenthesized fields. Both are split with the same depth
//! scan; the only difference is whether whitespace before an item is skipped or carried into the
//! scanned prefix (and trimmed off afterwards).

use crate::error::{Error, Result};

/// Whitespace the item tokenizer skips between items.
const ITEM_SEPARATORS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Scan the shortest prefix of `input` whose parenthesis depth becomes positive and then returns
/// to zero.
///
/// Returns the trimmed item and the remainder, which starts right after the item's closing
/// parenthesis. `Ok(None)` means there is nothing left but whitespace.
///
/// Fails with [`Error::Unbalanced`] if the input ends before the depth returns to zero.
pub fn scan_balanced(input: &str, skip_leading_whitespace: bool) -> Result<Option<(&str, &str)>> {
    let start = if skip_leading_whitespace {
        match input.find(|c: char| !ITEM_SEPARATORS.contains(&c)) {
            Some(start) => start,
            None => return Ok(None),
        }
    } else if input.trim().is_empty() {
        return Ok(None);
    } else {
        0
    };

    let mut depth: i64 = 0;
    let mut opened = false;

    // Parentheses are ASCII, so byte offsets right after them are always char boundaries.
    for (offset, byte) in input.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => continue,
        }

        if depth > 0 {
            opened = true;
        } else if opened && depth == 0 {
            let end = start + offset + 1;
            return Ok(Some((input[start..end].trim(), &input[end..])));
        }
    }

    Err(Error::Unbalanced { depth })
}

/// Next top-level item of a tape body, skipping the whitespace that separates items.
pub fn next_item(input: &str) -> Result<Option<(&str, &str)>> {
    scan_balanced(input, true)
}

/// Next field inside an exchange item. Leading whitespace is not skipped, only trimmed from the
/// returned field.
pub fn next_field(input: &str) -> Result<Option<(&str, &str)>> {
    scan_balanced(input, false)
}

/// Split a whole tape body into its top-level items, in order.
pub fn items(mut input: &str) -> Result<Vec<&str>> {
    let mut items = Vec::new();
    while let Some((item, rest)) = next_item(input)? {
        items.push(item);
        input = rest;
    }
    Ok(items)
}
