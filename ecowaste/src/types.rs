//! Common type definitions.
//!
//! Identifiers are sequential integers handed out by the store, starting at 1.

/// User account identifier
pub type UserId = i64;

/// Waste entry identifier
pub type EntryId = i64;
