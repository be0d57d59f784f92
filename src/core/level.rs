//! Marker-name character classes and level suffixes.

use regex::Regex;
use std::sync::OnceLock;

fn level_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^0-9]+)([0-9]+)$").expect("level suffix pattern is valid"))
}

/// Tests if a byte can be part of a marker name.
pub fn is_marker_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-'
}

/// Splits a tag into its class and trailing level, e.g. `q2` -> (`q`, 2).
///
/// Tags without a trailing digit run (or made only of digits) keep the whole
/// tag as their class and have no level.
pub fn split_level(tag: &str) -> (&str, Option<u32>) {
    if let Some(caps) = level_suffix().captures(tag) {
        if let (Some(class), Some(digits)) = (caps.get(1), caps.get(2)) {
            if let Ok(level) = digits.as_str().parse() {
                return (class.as_str(), Some(level));
            }
        }
    }
    (tag, None)
}

/// Parses a tag with an appended level number. If no number, 1 is assumed.
///
/// Returns `None` when `tag` is not `key` followed by an optional digit run.
pub fn parse_leveled_tag(key: &str, tag: &str) -> Option<u32> {
    let digits = tag.strip_prefix(key)?;
    if digits.is_empty() {
        return Some(1);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Returns the leading ASCII digit run of `text` as a number.
pub fn leading_number(text: &str) -> Option<u32> {
    let end = text
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}
