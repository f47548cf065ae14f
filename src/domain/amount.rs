//! Amount text acceptance and parsing.
//!
//! The input box stores raw text. Keystrokes that would make the text
//! something other than a non-negative decimal are rejected outright;
//! accepted text may still be transiently unparsable (e.g. `"."`).

use std::sync::LazyLock;

use regex::Regex;

/// Digits, an optional single decimal point, digits. Empty matches too.
static AMOUNT_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("amount pattern is valid"));

/// Whether `text` may be stored as the amount.
pub fn is_acceptable_amount_text(text: &str) -> bool {
    text.is_empty() || AMOUNT_TEXT.is_match(text)
}

/// Parse the amount text, normalizing anything unparsable to 0.
pub fn parse_amount(text: &str) -> f64 {
    parse_leading_number(text).unwrap_or(0.0)
}

/// Longest leading decimal prefix of `text`, like a lenient float parse.
///
/// `"12."` is 12, `".5"` is 0.5, `"."` and `""` are `None`.
pub(crate) fn parse_leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let mut end = 0;
    let mut seen_point = false;
    for (i, c) in trimmed.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_point => {
                seen_point = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    let prefix = &trimmed[..end];
    if !prefix.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}
