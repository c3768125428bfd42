//! In-memory contact log and index helpers.

/// Helper index aliases.
pub mod indices;
/// Ordered contact log with a callsign index.
pub mod store;
