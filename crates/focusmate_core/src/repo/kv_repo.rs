//! Key-value repository contracts plus SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Provide `read`/`write`/`remove` of string blobs by key.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `write` is an upsert; the previous value under the key is discarded.
//! - Blank keys are rejected before touching storage.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for key-value persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidKey,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey => write!(f, "storage key cannot be blank"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Keyed blob storage, the moral equivalent of browser local storage.
pub trait KeyValueRepository {
    fn read(&self, key: &str) -> RepoResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Returns whether a value existed under `key`.
    fn remove(&self, key: &str) -> RepoResult<bool>;
}

/// SQLite-backed key-value repository over the `kv_store` table.
pub struct SqliteKeyValueRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueRepository for SqliteKeyValueRepository<'_> {
    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        ensure_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> RepoResult<()> {
        ensure_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        ensure_key(key)?;
        let changed = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

/// Process-local key-value repository. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueRepository {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryKeyValueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one raw value, bypassing any caller-level serialization.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let repo = Self::new();
        repo.values.borrow_mut().insert(key.into(), value.into());
        repo
    }
}

impl KeyValueRepository for MemoryKeyValueRepository {
    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        ensure_key(key)?;
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> RepoResult<()> {
        ensure_key(key)?;
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        ensure_key(key)?;
        Ok(self.values.borrow_mut().remove(key).is_some())
    }
}

impl<T: KeyValueRepository + ?Sized> KeyValueRepository for &T {
    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        (**self).remove(key)
    }
}

fn ensure_key(key: &str) -> RepoResult<()> {
    if key.trim().is_empty() {
        return Err(RepoError::InvalidKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{KeyValueRepository, MemoryKeyValueRepository, RepoError, SqliteKeyValueRepository};
    use crate::db::open_db_in_memory;

    #[test]
    fn sqlite_write_is_upsert() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteKeyValueRepository::new(&conn);

        assert_eq!(repo.read("k").unwrap(), None);
        repo.write("k", "first").unwrap();
        repo.write("k", "second").unwrap();
        assert_eq!(repo.read("k").unwrap().as_deref(), Some("second"));

        assert!(repo.remove("k").unwrap());
        assert!(!repo.remove("k").unwrap());
    }

    #[test]
    fn blank_keys_are_rejected() {
        let repo = MemoryKeyValueRepository::new();
        assert!(matches!(repo.write("  ", "v"), Err(RepoError::InvalidKey)));
        assert!(matches!(repo.read(""), Err(RepoError::InvalidKey)));
    }
}
