//! Core domain logic for FocusMate, a personal study-session tracker.
//! This crate owns the entry store, its derived statistics and the
//! feedback text shown to the user.

pub mod clock;
pub mod config;
pub mod db;
pub mod feedback;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stats;
pub mod timer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{resolve_db_path, StoreConfig, DEFAULT_STORAGE_KEY};
pub use feedback::{analyze_progress, canned_response, USAGE_PROMPT};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{parse_minutes, Entry, ValidationError, DEFAULT_SUBJECT};
pub use repo::kv_repo::{
    KeyValueRepository, MemoryKeyValueRepository, RepoError, RepoResult, SqliteKeyValueRepository,
};
pub use service::entry_store::{EntryStore, StoreError, StoreResult, StoreSummary};
pub use stats::{DailyTotal, SubjectBreakdown};
pub use timer::{FocusTimer, TimerTick};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
