//! Tag-to-field mapping and date/time reformatting.

use crate::contact::ContactDraft;

use super::tokenizer::TagToken;

/// ADIF fields this importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdifField {
    /// `CALL`
    Call,
    /// `QSO_DATE`
    QsoDate,
    /// `TIME_ON`
    TimeOn,
    /// `BAND`
    Band,
    /// `MODE`
    Mode,
    /// `RST_SENT`
    RstSent,
}

impl AdifField {
    /// Looks up an uppercased tag name.
    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "CALL" => Some(Self::Call),
            "QSO_DATE" => Some(Self::QsoDate),
            "TIME_ON" => Some(Self::TimeOn),
            "BAND" => Some(Self::Band),
            "MODE" => Some(Self::Mode),
            "RST_SENT" => Some(Self::RstSent),
            _ => None,
        }
    }

    /// Writes `value` into the matching draft slot, replacing any earlier value.
    pub fn apply(self, draft: &mut ContactDraft, value: &str) {
        match self {
            Self::Call => draft.callsign = Some(value.to_string()),
            Self::QsoDate => draft.date = Some(format_date(value)),
            Self::TimeOn => draft.time = Some(format_time(value)),
            Self::Band => draft.band = Some(value.to_string()),
            Self::Mode => draft.mode = Some(value.to_string()),
            Self::RstSent => draft.rst = Some(value.to_string()),
        }
    }
}

/// Folds the tokens of one record into a draft. Unknown tags are skipped.
pub fn map_tags(tokens: &[TagToken<'_>]) -> ContactDraft {
    let mut draft = ContactDraft::default();
    for token in tokens {
        if let Some(field) = AdifField::from_tag(token.name) {
            field.apply(&mut draft, token.value);
        }
    }
    draft
}

/// `YYYYMMDD` to `YYYY-MM-DD`; anything not exactly 8 characters passes through.
pub fn format_date(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() != 8 {
        return s.to_string();
    }
    let part = |r: std::ops::Range<usize>| chars[r].iter().collect::<String>();
    format!("{}-{}-{}", part(0..4), part(4..6), part(6..8))
}

/// `HHMM[SS]` to `HH:MM`; shorter input passes through.
pub fn format_time(s: &str) -> String {
    let chars: Vec<char> = s.chars().take(4).collect();
    if chars.len() < 4 {
        return s.to_string();
    }
    let hh: String = chars[..2].iter().collect();
    let mm: String = chars[2..].iter().collect();
    format!("{hh}:{mm}")
}
