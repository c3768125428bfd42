//! ADIF log text to [`ContactRecord`] conversion.
//!
//! Parsing is best-effort: blank segments, records without a callsign, and
//! tokens with a malformed length are skipped silently. Nothing here fails.

use tracing::debug;

use crate::contact::ContactRecord;

/// Tag-to-field mapping and date/time reformatting.
pub mod mapper;
/// Record splitting and tag token extraction.
pub mod tokenizer;

/// Contacts from one parse plus skip accounting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseReport {
    /// Contacts in source record order.
    pub contacts: Vec<ContactRecord>,
    /// Non-blank record segments scanned, header segment included.
    pub records_scanned: usize,
    /// Segments dropped because no non-empty `CALL` was found.
    pub skipped_without_call: usize,
}

/// Parses `text` into contacts, in source order.
pub fn parse(text: &str) -> Vec<ContactRecord> {
    parse_report(text).contacts
}

/// Parses `text` and reports how many records were skipped.
pub fn parse_report(text: &str) -> ParseReport {
    let normalized = tokenizer::normalize(text);
    let mut report = ParseReport::default();

    for (idx, record) in tokenizer::split_records(&normalized).enumerate() {
        report.records_scanned += 1;
        let tokens = tokenizer::extract_tags(record);
        let draft = mapper::map_tags(&tokens);
        let mapped_any = !draft.is_empty();
        match draft.into_contact() {
            Some(contact) => report.contacts.push(contact),
            None => {
                report.skipped_without_call += 1;
                debug!(
                    record = idx,
                    tags = tokens.len(),
                    mapped_any,
                    "skipping ADIF record without CALL"
                );
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_segment_is_counted_but_produces_nothing() {
        let text = "Log export\n<ADIF_VER:5>3.1.4 <PROGRAMID:4>TEST <EOH>\n";
        let report = parse_report(text);
        assert!(report.contacts.is_empty());
        assert_eq!(report.records_scanned, 1);
        assert_eq!(report.skipped_without_call, 1);
    }

    #[test]
    fn header_sharing_first_segment_keeps_first_contact() {
        let text = "<ADIF_VER:5>3.1.4<EOH>\n<CALL:4>W1AW<EOR>\n<CALL:5>K1ABC<EOR>\n";
        let calls: Vec<String> = parse(text).into_iter().map(|c| c.callsign).collect();
        assert_eq!(calls, vec!["W1AW", "K1ABC"]);
    }
}
