//! Domain model for recorded focus sessions.
//!
//! # Responsibility
//! - Define the canonical `Entry` record shared by store, statistics and feedback.
//! - Own input parsing rules for user-supplied minutes and dates.
//!
//! # Invariants
//! - Every stored entry is identified by an `id` that is unique within the store.
//! - Entries created through the store always carry `minutes >= 1`.

pub mod entry;
