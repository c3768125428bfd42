//! QSL card design state fed by imported contacts.
//!
//! Renderers read [`QsoCardData`], which always carries text for every slot:
//! fields a contact does not provide fall back to [`CardDefaults`].

use serde::{Deserialize, Serialize};

use crate::contact::ContactRecord;

/// Background used until the operator picks one.
pub const DEFAULT_BACKGROUND_URL: &str = "https://images.unsplash.com/photo-1595246140625-573b715d11dc?q=80&w=2670&auto=format&fit=crop";

/// Placeholder text for card slots a contact leaves empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefaults {
    /// Shown when the date is missing.
    pub date: String,
    /// Shown when the time is missing.
    pub time: String,
    /// Shown when the band is missing.
    pub band: String,
    /// Shown when the mode is missing.
    pub mode: String,
    /// Shown when no report was logged.
    pub rst: String,
}

impl Default for CardDefaults {
    fn default() -> Self {
        let dash = || "----".to_string();
        Self {
            date: dash(),
            time: dash(),
            band: dash(),
            mode: dash(),
            rst: dash(),
        }
    }
}

/// The QSO block printed on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QsoCardData {
    /// Station the card is addressed to.
    pub to_call: String,
    /// QSO date.
    pub date: String,
    /// QSO time, suffixed with `UTC`.
    pub time: String,
    /// Band label.
    pub band: String,
    /// Mode label.
    pub mode: String,
    /// Signal report.
    pub rst: String,
}

impl QsoCardData {
    /// Fills every slot from `contact`, using `defaults` for absent fields.
    pub fn from_contact(contact: &ContactRecord, defaults: &CardDefaults) -> Self {
        Self {
            to_call: contact.callsign.clone(),
            date: or_placeholder(&contact.date, &defaults.date),
            time: contact
                .time
                .as_deref()
                .map(utc_label)
                .unwrap_or_else(|| defaults.time.clone()),
            band: or_placeholder(&contact.band, &defaults.band),
            mode: or_placeholder(&contact.mode, &defaults.mode),
            rst: or_placeholder(&contact.rst, &defaults.rst),
        }
    }
}

/// Full card design: station identity, look, and QSO block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QslDesign {
    /// Sending station callsign.
    pub callsign: String,
    /// Sending station Maidenhead locator.
    pub grid_square: String,
    /// Card background image.
    pub background_url: String,
    /// Accent colour as a hex string.
    pub theme_color: String,
    /// QSO block.
    pub qso: QsoCardData,
}

impl Default for QslDesign {
    fn default() -> Self {
        Self {
            callsign: "K1HAM".to_string(),
            grid_square: "FN42".to_string(),
            background_url: DEFAULT_BACKGROUND_URL.to_string(),
            theme_color: "#10b981".to_string(),
            qso: QsoCardData {
                to_call: "W1AW".to_string(),
                date: "2023-10-25".to_string(),
                time: "14:32 UTC".to_string(),
                band: "20M".to_string(),
                mode: "SSB".to_string(),
                rst: "59".to_string(),
            },
        }
    }
}

impl QslDesign {
    /// Overwrites the QSO slots `contact` carries; the rest keep their text.
    pub fn apply_contact(&mut self, contact: &ContactRecord) {
        let qso = &mut self.qso;
        qso.to_call = contact.callsign.clone();
        if let Some(v) = &contact.date {
            qso.date = v.clone();
        }
        if let Some(v) = &contact.time {
            qso.time = utc_label(v);
        }
        if let Some(v) = &contact.band {
            qso.band = v.clone();
        }
        if let Some(v) = &contact.mode {
            qso.mode = v.clone();
        }
        if let Some(v) = &contact.rst {
            qso.rst = v.clone();
        }
    }
}

fn or_placeholder(value: &Option<String>, placeholder: &str) -> String {
    value.clone().unwrap_or_else(|| placeholder.to_string())
}

fn utc_label(time: &str) -> String {
    format!("{time} UTC")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_placeholders() {
        let contact = ContactRecord {
            mode: Some("CW".to_string()),
            time: Some("09:05".to_string()),
            ..ContactRecord::with_call("G4ABC")
        };
        let card = QsoCardData::from_contact(&contact, &CardDefaults::default());
        assert_eq!(card.to_call, "G4ABC");
        assert_eq!(card.mode, "CW");
        assert_eq!(card.time, "09:05 UTC");
        assert_eq!(card.date, "----");
        assert_eq!(card.rst, "----");
    }

    #[test]
    fn apply_contact_keeps_unset_slots() {
        let mut design = QslDesign::default();
        design.apply_contact(&ContactRecord {
            band: Some("40M".to_string()),
            ..ContactRecord::with_call("JA1XYZ")
        });
        assert_eq!(design.qso.to_call, "JA1XYZ");
        assert_eq!(design.qso.band, "40M");
        assert_eq!(design.qso.mode, "SSB");
        assert_eq!(design.callsign, "K1HAM");
    }

    #[test]
    fn design_serializes_camel_case() {
        let json = serde_json::to_value(QslDesign::default()).unwrap();
        assert_eq!(json["gridSquare"], "FN42");
        assert_eq!(json["qso"]["toCall"], "W1AW");
    }
}
