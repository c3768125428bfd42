//! Contact draft and record types produced by the ADIF importer.

use serde::{Deserialize, Serialize};

use crate::types::ContactId;

/// Sparse accumulator filled while scanning one ADIF record.
///
/// Every field is optional; later tags overwrite earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactDraft {
    /// Worked station callsign.
    pub callsign: Option<String>,
    /// QSO date, `YYYY-MM-DD` when the source was well formed.
    pub date: Option<String>,
    /// QSO start time, `HH:MM` when the source was well formed.
    pub time: Option<String>,
    /// Band label as written in the log, e.g. `20M`.
    pub band: Option<String>,
    /// Mode label as written in the log, e.g. `SSB`.
    pub mode: Option<String>,
    /// Signal report sent.
    pub rst: Option<String>,
}

impl ContactDraft {
    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Promotes the draft to a [`ContactRecord`].
    ///
    /// Returns `None` when the callsign is missing or blank.
    pub fn into_contact(self) -> Option<ContactRecord> {
        let callsign = self.callsign?;
        if callsign.trim().is_empty() {
            return None;
        }
        Some(ContactRecord {
            callsign,
            date: self.date,
            time: self.time,
            band: self.band,
            mode: self.mode,
            rst: self.rst,
        })
    }
}

/// One imported contact. Only `callsign` is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Worked station callsign, never empty.
    pub callsign: String,
    /// QSO date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// QSO start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Band label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    /// Mode label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Signal report sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rst: Option<String>,
}

impl ContactRecord {
    /// Builds a record carrying only a callsign.
    pub fn with_call(callsign: impl Into<String>) -> Self {
        Self {
            callsign: callsign.into(),
            date: None,
            time: None,
            band: None,
            mode: None,
            rst: None,
        }
    }
}

/// A contact held by [`crate::core::store::ContactLog`], tagged with its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredContact {
    /// Stable contact identifier.
    pub id: ContactId,
    /// Contact payload.
    pub contact: ContactRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_callsign_is_not_promoted() {
        let draft = ContactDraft {
            callsign: Some("   ".to_string()),
            band: Some("20M".to_string()),
            ..ContactDraft::default()
        };
        assert_eq!(draft.into_contact(), None);
        assert_eq!(ContactDraft::default().into_contact(), None);
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let rec = ContactRecord {
            band: Some("40M".to_string()),
            ..ContactRecord::with_call("K1ABC")
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"callsign":"K1ABC","band":"40M"}"#);

        let back: ContactRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }
}
