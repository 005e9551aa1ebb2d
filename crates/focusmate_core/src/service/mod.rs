//! Core use-case services.
//!
//! # Responsibility
//! - Own mutable application state behind explicit objects.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod entry_store;
