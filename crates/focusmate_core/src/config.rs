//! Store configuration and storage path resolution.
//!
//! # Responsibility
//! - Hold the knobs the entry store needs at `open` time.
//! - Resolve where the SQLite file lives.
//!
//! # Invariants
//! - Path resolution order: explicit path, `FOCUSMATE_DB_PATH`, platform data dir.

use std::path::{Path, PathBuf};

/// Storage key the serialized entry list lives under.
pub const DEFAULT_STORAGE_KEY: &str = "focusmate_entries_v1";
/// Environment variable that overrides the database location.
pub const DB_PATH_ENV: &str = "FOCUSMATE_DB_PATH";
/// File name used under the platform data directory.
pub const DB_FILE_NAME: &str = "focusmate.sqlite3";
/// Rows shown by the list view.
pub const DEFAULT_LIST_LIMIT: usize = 50;

const APP_DIR_NAME: &str = "focusmate";

/// Entry store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key of the persisted entry blob.
    pub storage_key: String,
    /// Seed demonstration entries when the store opens empty.
    pub seed_demo: bool,
    /// Maximum rows returned by the list view.
    pub list_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_demo: true,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// Resolves the database path.
///
/// `explicit` wins, then a non-empty `FOCUSMATE_DB_PATH`, then
/// `<data_local_dir>/focusmate/focusmate.sqlite3` (current directory when the
/// platform has no data dir).
pub fn resolve_db_path(explicit: Option<&Path>) -> PathBuf {
    let from_env = std::env::var(DB_PATH_ENV).ok();
    resolve_db_path_with(explicit, from_env.as_deref())
}

fn resolve_db_path_with(explicit: Option<&Path>, from_env: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(value) = from_env.map(str::trim).filter(|value| !value.is_empty()) {
        return PathBuf::from(value);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{resolve_db_path_with, StoreConfig, DB_FILE_NAME, DEFAULT_STORAGE_KEY};
    use std::path::{Path, PathBuf};

    #[test]
    fn default_config_matches_entry_form_behavior() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(config.seed_demo);
        assert_eq!(config.list_limit, 50);
    }

    #[test]
    fn explicit_path_beats_environment() {
        let resolved = resolve_db_path_with(Some(Path::new("/tmp/a.db")), Some("/tmp/b.db"));
        assert_eq!(resolved, PathBuf::from("/tmp/a.db"));
    }

    #[test]
    fn blank_environment_value_falls_back_to_data_dir() {
        let resolved = resolve_db_path_with(None, Some("  "));
        assert!(resolved.ends_with(DB_FILE_NAME));

        let from_env = resolve_db_path_with(None, Some("/tmp/env.db"));
        assert_eq!(from_env, PathBuf::from("/tmp/env.db"));
    }
}
