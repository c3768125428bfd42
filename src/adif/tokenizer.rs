//! Record splitting and `<NAME:LEN>VALUE` token extraction.

use once_cell::sync::Lazy;
use regex::Regex;

/// End-of-record marker, matched after the input is uppercased.
pub const EOR_MARKER: &str = "<EOR>";

// Name and length are ASCII-only; the value runs up to the next `<`.
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<([A-Za-z0-9_]+)(?::([0-9]+))?>([^<]*)").expect("tag pattern is valid")
});

/// One tag occurrence inside a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken<'a> {
    /// Tag name as it appears in the (uppercased) record.
    pub name: &'a str,
    /// Declared value length, `None` when absent or too large to represent.
    pub declared_len: Option<usize>,
    /// Trimmed value, already truncated to `declared_len` characters.
    pub value: &'a str,
}

/// Uppercases the whole log.
///
/// Tag names and markers become case-insensitive; value text loses its case too.
pub fn normalize(raw: &str) -> String {
    raw.to_uppercase()
}

/// Splits normalized text on [`EOR_MARKER`], dropping blank segments.
pub fn split_records(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(EOR_MARKER)
        .filter(|segment| !segment.trim().is_empty())
}

/// Extracts every tag token of `record` in scan order.
pub fn extract_tags(record: &str) -> Vec<TagToken<'_>> {
    TAG_REGEX
        .captures_iter(record)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let declared_len = caps.get(2).and_then(|m| m.as_str().parse::<usize>().ok());
            let raw = caps.get(3).map_or("", |m| m.as_str()).trim();
            let value = match declared_len {
                Some(len) => truncate_chars(raw, len),
                None => raw,
            };
            Some(TagToken {
                name,
                declared_len,
                value,
            })
        })
        .collect()
}

/// Keeps at most `max` leading characters of `s`.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
