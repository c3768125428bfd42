//! Shared primitive IDs.

/// Monotonic contact identifier assigned by the contact log.
pub type ContactId = u64;
