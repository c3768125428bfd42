//! Contact persistence abstraction.

/// SQLite-backed contact sink.
pub mod sqlite;

use crate::{contact::StoredContact, core::store::LogError, types::ContactId};

/// Persistence failures.
#[derive(Debug)]
pub enum PersistError {
    /// SQLite driver error.
    Sqlite(rusqlite::Error),
    /// Payload encode/decode error.
    Serde(serde_json::Error),
    /// Any other failure, described in text.
    Message(String),
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

impl From<LogError> for PersistError {
    fn from(value: LogError) -> Self {
        Self::Message(format!("log error: {value:?}"))
    }
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::Serde(err) => write!(f, "payload: {err}"),
            Self::Message(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for PersistError {}

/// Result alias for persistence calls.
pub type PersistResult<T> = Result<T, PersistError>;

/// Destination for contacts drained from a [`crate::core::store::ContactLog`].
pub trait ContactSink: Send {
    /// Appends contacts and returns the highest id stored after the append.
    fn append_contacts(&mut self, contacts: &[StoredContact]) -> PersistResult<ContactId>;
    /// Makes appended contacts durable.
    fn flush(&mut self) -> PersistResult<()> {
        Ok(())
    }
}
