//! ADIF contact import for QSL card production.
//!
//! # Examples
//!
//! Parsing a log with [`adif::parse`]:
//! ```
//! use qslfactory::adif;
//!
//! let text = "<ADIF_VER:5>3.1.4<EOH>\n\
//!             <call:4>w1aw<QSO_DATE:8>20231025<TIME_ON:6>143210<BAND:3>20M<EOR>\n\
//!             <BAND:3>40M<EOR>\n";
//! let contacts = adif::parse(text);
//! assert_eq!(contacts.len(), 1);
//! assert_eq!(contacts[0].callsign, "W1AW");
//! assert_eq!(contacts[0].date.as_deref(), Some("2023-10-25"));
//! assert_eq!(contacts[0].time.as_deref(), Some("14:32"));
//! assert_eq!(contacts[0].mode, None);
//! ```
//!
//! Importing into a log and persisting with SQLite:
//! ```no_run
//! use qslfactory::{
//!     core::store::ContactLog,
//!     persist::{sqlite::SqliteContactSink, ContactSink},
//! };
//!
//! let mut sink = SqliteContactSink::open("contacts.db").expect("open sqlite");
//! let mut log = sink.load_log().expect("load");
//! let summary = log.import_adif("<CALL:5>K1ABC<EOR>").expect("import");
//! sink.append_contacts(&log.drain_pending()).expect("append");
//! assert_eq!(summary.imported, 1);
//! ```
#![deny(missing_docs)]

/// ADIF tokenizer, field mapper, and parse entry points.
pub mod adif;
/// QSL card design state and placeholder defaults.
pub mod card;
/// Contact draft and record types.
pub mod contact;
/// In-memory contact log and index helpers.
pub mod core;
/// Persistence abstraction and SQLite implementation.
pub mod persist;
/// Shared primitive types.
pub mod types;
