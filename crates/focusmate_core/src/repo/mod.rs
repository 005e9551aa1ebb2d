//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Model local storage as a keyed blob store.
//! - Isolate SQLite details from the entry store.
//!
//! # Invariants
//! - A write replaces the whole value under its key.
//! - Keys are non-blank.

pub mod kv_repo;
