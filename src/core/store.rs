use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    adif,
    contact::{ContactRecord, StoredContact},
    types::ContactId,
};

use super::indices::VecIndex;

/// Contact log replay failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// A replayed contact reused an id already in the log.
    AlreadyExists(ContactId),
    /// No id is left after this one.
    IdsExhausted(ContactId),
    /// Id 0 is never assigned.
    ReservedId,
}

/// Outcome of one [`ContactLog::import_adif`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Contacts added to the log.
    pub imported: usize,
    /// Records dropped for lacking a callsign.
    pub skipped: usize,
}

/// Ordered, callsign-indexed collection of imported contacts.
#[derive(Debug)]
pub struct ContactLog {
    records: HashMap<ContactId, ContactRecord>,
    order: Vec<ContactId>,
    by_call: VecIndex<String>,
    pending: Vec<StoredContact>,
    next_id: ContactId,
}

impl ContactLog {
    /// Creates an empty log whose first id is 1.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
            by_call: VecIndex::new(),
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Parses `text` and appends every contact it yields.
    ///
    /// Stops at the first contact that cannot be given an id; contacts
    /// appended before that stay in the log.
    pub fn import_adif(&mut self, text: &str) -> Result<ImportSummary, LogError> {
        let report = adif::parse_report(text);
        let imported = report.contacts.len();
        for contact in report.contacts {
            self.insert(contact)?;
        }
        info!(imported, skipped = report.skipped_without_call, "imported ADIF log");
        Ok(ImportSummary {
            imported,
            skipped: report.skipped_without_call,
        })
    }

    /// Appends one contact and queues it for persistence.
    pub fn insert(&mut self, contact: ContactRecord) -> Result<ContactId, LogError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(LogError::IdsExhausted(id))?;
        self.link(id, contact.clone());
        self.pending.push(StoredContact { id, contact });
        Ok(id)
    }

    /// Re-inserts a persisted contact under its original id.
    ///
    /// Ids start at 1, so id 0 is rejected, as is the largest id.
    pub fn insert_stored(&mut self, stored: StoredContact) -> Result<(), LogError> {
        if stored.id == 0 {
            return Err(LogError::ReservedId);
        }
        if self.records.contains_key(&stored.id) {
            return Err(LogError::AlreadyExists(stored.id));
        }
        let next = stored
            .id
            .checked_add(1)
            .ok_or(LogError::IdsExhausted(stored.id))?;
        self.next_id = self.next_id.max(next);
        self.link(stored.id, stored.contact);
        Ok(())
    }

    /// Looks up one contact.
    pub fn get(&self, id: ContactId) -> Option<&ContactRecord> {
        self.records.get(&id)
    }

    /// Returns up to `n` most recently inserted contacts, oldest first.
    pub fn recent(&self, n: usize) -> Vec<&ContactRecord> {
        let len = self.order.len();
        let start = len.saturating_sub(n);
        self.order[start..]
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// Returns every contact with exactly this callsign, in insert order.
    pub fn by_call(&self, call: &str) -> Vec<&ContactRecord> {
        self.by_call
            .get(call)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// Ids in insert order.
    pub fn ordered_ids(&self) -> &[ContactId] {
        &self.order
    }

    /// Number of contacts held.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the log holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Contacts inserted since the last drain, oldest first.
    pub fn drain_pending(&mut self) -> Vec<StoredContact> {
        std::mem::take(&mut self.pending)
    }

    fn link(&mut self, id: ContactId, contact: ContactRecord) {
        self.by_call
            .entry(contact.callsign.clone())
            .or_default()
            .push(id);
        self.order.push(id);
        self.records.insert(id, contact);
    }
}

impl Default for ContactLog {
    fn default() -> Self {
        Self::new()
    }
}
