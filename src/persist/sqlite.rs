//! SQLite-backed append-only contact table.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    contact::{ContactRecord, StoredContact},
    core::store::ContactLog,
    types::ContactId,
};

use super::{ContactSink, PersistError, PersistResult};

/// Version number for serialized contact payloads.
pub const CONTACT_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContactEnvelope {
    format_version: u16,
    contact: ContactRecord,
}

/// SQLite implementation of [`crate::persist::ContactSink`].
pub struct SqliteContactSink {
    conn: Connection,
}

impl SqliteContactSink {
    /// Opens or creates a SQLite-backed sink at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory SQLite sink.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    /// Rebuilds a [`ContactLog`] from every stored contact.
    ///
    /// The returned log has nothing pending; new inserts continue after the
    /// highest stored id.
    pub fn load_log(&self) -> PersistResult<ContactLog> {
        let mut log = ContactLog::new();
        for stored in self.load_after(0)? {
            log.insert_stored(stored)?;
        }
        Ok(log)
    }

    /// Loads contacts with id strictly greater than `id`, in id order.
    pub fn load_after(&self, id: ContactId) -> PersistResult<Vec<StoredContact>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, payload FROM contacts WHERE id > ?1 ORDER BY id ASC")?;

        let after = i64::try_from(id).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![after], |row| {
            let raw: i64 = row.get(0)?;
            let id = ContactId::try_from(raw)
                .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, raw))?;
            let payload: Vec<u8> = row.get(1)?;
            let contact = decode_contact_payload(&payload).map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(
                    payload.len(),
                    rusqlite::types::Type::Blob,
                    Box::new(std::io::Error::other(err)),
                )
            })?;
            Ok(StoredContact { id, contact })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Returns the highest stored contact id, 0 when empty.
    pub fn latest_id(&self) -> PersistResult<ContactId> {
        let id: Option<i64> = self
            .conn
            .query_row("SELECT MAX(id) FROM contacts", [], |row| row.get(0))?;
        let id = id.unwrap_or(0);
        ContactId::try_from(id)
            .map_err(|_| PersistError::Message(format!("negative contact id {id}")))
    }
}

impl ContactSink for SqliteContactSink {
    fn append_contacts(&mut self, contacts: &[StoredContact]) -> PersistResult<ContactId> {
        if contacts.is_empty() {
            return self.latest_id();
        }

        let ts_ms = now_ms();
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO contacts(id, ts_ms, callsign, payload) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for stored in contacts {
                let id = i64::try_from(stored.id).map_err(|_| {
                    PersistError::Message(format!("contact id {} exceeds SQLite range", stored.id))
                })?;
                let payload = serde_json::to_vec(&ContactEnvelope {
                    format_version: CONTACT_FORMAT_VERSION,
                    contact: stored.contact.clone(),
                })?;
                stmt.execute(params![
                    id,
                    ts_ms as i64,
                    stored.contact.callsign,
                    payload,
                ])?;
            }
        }
        tx.commit()?;

        info!(count = contacts.len(), "stored contacts");
        self.latest_id()
    }

    fn flush(&mut self) -> PersistResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(PASSIVE);")?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn decode_contact_payload(payload: &[u8]) -> Result<ContactRecord, String> {
    let envelope: ContactEnvelope = serde_json::from_slice(payload)
        .map_err(|e| format!("contact payload decode failed: {e}"))?;
    if envelope.format_version != CONTACT_FORMAT_VERSION {
        return Err(format!(
            "unsupported contact format version: {}",
            envelope.format_version
        ));
    }
    Ok(envelope.contact)
}
