//! Entry store: owner of the focus-session collection.
//!
//! # Responsibility
//! - Hold the ordered entry list and be the only writer of it.
//! - Persist the full list after every mutation.
//! - Load the persisted list at open/reload time, seeding demo data when empty.
//!
//! # Invariants
//! - Entries are kept most-recently-added first; the list is never re-sorted.
//! - Every entry created here has `minutes >= 1` and a fresh unique `id`.
//! - `load` never fails: unreadable or unparsable storage reads as empty.
//! - Mutations report change through return values only; presentation
//!   (list rows, chart) is the caller's business.

use crate::clock::Clock;
use crate::config::StoreConfig;
use crate::model::entry::{
    format_date, parse_date, parse_minutes, Entry, ValidationError, DEFAULT_SUBJECT,
};
use crate::repo::kv_repo::{KeyValueRepository, RepoError};
use crate::stats;
use chrono::Duration;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Entry store error.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    NotFound(String),
    Persist(RepoError),
    Serialize(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::Persist(err) => write!(f, "failed to persist entries: {err}"),
            Self::Serialize(message) => write!(f, "failed to serialize entries: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persist(err) => Some(err),
            Self::NotFound(_) | Self::Serialize(_) => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Persist(value)
    }
}

/// Aggregate header numbers shown above the entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSummary {
    pub total_minutes: u64,
    pub session_count: usize,
}

/// Outcome of reading the stored entry list.
enum PersistedList {
    Missing,
    Loaded(Vec<Entry>),
    Unreadable,
}

impl PersistedList {
    fn into_entries(self) -> Vec<Entry> {
        match self {
            Self::Loaded(entries) => entries,
            Self::Missing | Self::Unreadable => Vec::new(),
        }
    }
}

/// Owner of the entry collection and its persistence.
pub struct EntryStore<R: KeyValueRepository, C: Clock> {
    repo: R,
    clock: C,
    config: StoreConfig,
    entries: Vec<Entry>,
}

impl<R: KeyValueRepository, C: Clock> EntryStore<R, C> {
    /// Opens the store: loads persisted entries and seeds demo entries when
    /// the stored list is absent or empty and `config.seed_demo` is set.
    ///
    /// Unreadable or unparsable storage opens as an empty store without
    /// seeding, so the stored value is not overwritten.
    ///
    /// # Errors
    /// - Returns `StoreError::Persist` when seeding cannot be written.
    pub fn open(repo: R, clock: C, config: StoreConfig) -> StoreResult<Self> {
        let mut store = Self {
            repo,
            clock,
            config,
            entries: Vec::new(),
        };
        let snapshot = store.read_persisted();
        let may_seed = matches!(snapshot, PersistedList::Missing | PersistedList::Loaded(_));
        store.entries = snapshot.into_entries();

        if store.entries.is_empty() && store.config.seed_demo && may_seed {
            store.entries = demo_entries(store.clock.today());
            store.persist("seed_demo")?;
        }

        info!(
            "event=store_open module=store status=ok entries={}",
            store.entries.len()
        );
        Ok(store)
    }

    /// Deserializes the persisted collection. Missing or unparsable data
    /// yields an empty list.
    pub fn load(&self) -> Vec<Entry> {
        self.read_persisted().into_entries()
    }

    fn read_persisted(&self) -> PersistedList {
        let raw = match self.repo.read(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return PersistedList::Missing,
            Err(err) => {
                warn!("event=store_load module=store status=error error_code=read_failed error={err}");
                return PersistedList::Unreadable;
            }
        };

        match serde_json::from_str::<Vec<Entry>>(&raw) {
            Ok(entries) => PersistedList::Loaded(entries),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error error_code=parse_failed error={err}"
                );
                PersistedList::Unreadable
            }
        }
    }

    /// Replaces the in-memory list with the persisted one. Returns the new size.
    pub fn reload(&mut self) -> usize {
        self.entries = self.load();
        self.entries.len()
    }

    /// Current entries, most recently added first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The first `limit` entries, as shown by the list view.
    pub fn recent(&self, limit: usize) -> &[Entry] {
        &self.entries[..self.entries.len().min(limit)]
    }

    /// The list view slice using `config.list_limit`.
    pub fn list_view(&self) -> &[Entry] {
        self.recent(self.config.list_limit)
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            total_minutes: stats::total_minutes(&self.entries),
            session_count: stats::session_count(&self.entries),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Records a new session at the front of the list.
    ///
    /// Blank `subject` becomes `"General"`; blank or absent `date` becomes today.
    /// `subject` and `remarks` are trimmed.
    ///
    /// # Errors
    /// - `ValidationError::MissingMinutes` when `minutes_raw` is not a positive integer.
    /// - `ValidationError::InvalidDate` when an explicit date is not `YYYY-MM-DD`.
    /// - `StoreError::Persist` when the write fails; the new entry is rolled back.
    pub fn add(
        &mut self,
        subject: &str,
        minutes_raw: &str,
        remarks: &str,
        date: Option<&str>,
    ) -> StoreResult<Entry> {
        let minutes = parse_minutes(minutes_raw).ok_or_else(|| ValidationError::MissingMinutes {
            raw: minutes_raw.to_string(),
        })?;

        let date = match date.map(str::trim).filter(|value| !value.is_empty()) {
            Some(raw) => parse_date(raw).ok_or_else(|| ValidationError::InvalidDate {
                raw: raw.to_string(),
            })?,
            None => self.clock.today(),
        };

        let subject = match subject.trim() {
            "" => DEFAULT_SUBJECT,
            trimmed => trimmed,
        };

        let entry = Entry::new(self.fresh_id(), subject, minutes, remarks.trim(), date);
        self.entries.insert(0, entry.clone());

        if let Err(err) = self.persist("entry_add") {
            self.entries.remove(0);
            return Err(err);
        }
        Ok(entry)
    }

    /// Edits minutes and/or remarks of an existing entry.
    ///
    /// Minutes change only when `new_minutes_raw` parses to a positive integer;
    /// any other value leaves them untouched without error. Any `Some` remarks,
    /// including an empty string, replaces the current remarks.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no entry has `id`.
    /// - `StoreError::Persist` when the write fails.
    pub fn edit(
        &mut self,
        id: &str,
        new_minutes_raw: Option<&str>,
        new_remarks: Option<&str>,
    ) -> StoreResult<Entry> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let previous = self.entries[index].clone();

        let entry = &mut self.entries[index];
        match new_minutes_raw.and_then(parse_minutes) {
            Some(minutes) => entry.minutes = minutes,
            None => debug!(
                "event=entry_edit module=store status=skip field=minutes entry_id={id}"
            ),
        }
        if let Some(remarks) = new_remarks {
            entry.remarks = remarks.to_string();
        }
        let updated = entry.clone();

        if let Err(err) = self.persist("entry_edit") {
            self.entries[index] = previous;
            return Err(err);
        }
        Ok(updated)
    }

    /// Removes the entry with `id`. Returns whether anything was removed.
    ///
    /// The collection is persisted either way.
    pub fn remove(&mut self, id: &str) -> StoreResult<bool> {
        let removed = match self.position(id) {
            Some(index) => Some((index, self.entries.remove(index))),
            None => None,
        };

        if let Err(err) = self.persist("entry_remove") {
            if let Some((index, entry)) = removed {
                self.entries.insert(index, entry);
            }
            return Err(err);
        }
        Ok(removed.is_some())
    }

    /// Prepends `external` ahead of the current entries, in its given order.
    ///
    /// No de-duplication by `id` and no per-entry validation is performed.
    /// Returns the number of merged entries.
    pub fn import_merge(&mut self, external: Vec<Entry>) -> StoreResult<usize> {
        let count = external.len();
        let mut merged = external;
        merged.append(&mut self.entries);
        self.entries = merged;

        if let Err(err) = self.persist("entry_import") {
            self.entries.drain(..count);
            return Err(err);
        }
        Ok(count)
    }

    /// Parses an import payload and merges it.
    ///
    /// # Errors
    /// - `ValidationError::ImportMalformed` for non-JSON input.
    /// - `ValidationError::ImportNotArray` when the top-level value is not an array.
    pub fn import_json(&mut self, raw: &str) -> StoreResult<usize> {
        let entries = parse_import(raw)?;
        self.import_merge(entries)
    }

    /// Returns the current list verbatim.
    pub fn export_snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    /// Serializes the current list for download.
    pub fn export_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(&self.entries)
            .map_err(|err| StoreError::Serialize(err.to_string()))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let candidate = Uuid::new_v4().to_string();
            if self.position(&candidate).is_none() {
                return candidate;
            }
        }
    }

    fn persist(&self, event: &str) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.entries)
            .map_err(|err| StoreError::Serialize(err.to_string()))?;

        match self.repo.write(&self.config.storage_key, &payload) {
            Ok(()) => {
                info!(
                    "event={event} module=store status=ok entries={} bytes={}",
                    self.entries.len(),
                    payload.len()
                );
                Ok(())
            }
            Err(err) => {
                error!("event={event} module=store status=error error_code=persist_failed error={err}");
                Err(err.into())
            }
        }
    }
}

/// Parses an import payload into entries without merging.
///
/// Only the payload shape is checked. Object elements are read leniently
/// (see [`Entry`]); elements that are not objects are skipped.
pub fn parse_import(raw: &str) -> Result<Vec<Entry>, ValidationError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|err| ValidationError::ImportMalformed {
            message: err.to_string(),
        })?;
    let serde_json::Value::Array(items) = value else {
        return Err(ValidationError::ImportNotArray);
    };

    let total = items.len();
    let entries: Vec<Entry> = items
        .into_iter()
        .filter(serde_json::Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if entries.len() < total {
        warn!(
            "event=entry_import module=store status=skip skipped={} kept={}",
            total - entries.len(),
            entries.len()
        );
    }
    Ok(entries)
}

/// The three demonstration entries seeded into an empty store.
pub fn demo_entries(today: chrono::NaiveDate) -> Vec<Entry> {
    let days_ago = |days: i64| format_date(today - Duration::days(days));
    vec![
        Entry {
            id: "d1".to_string(),
            subject: "Maths".to_string(),
            minutes: 25,
            remarks: "Solved 6 integrals".to_string(),
            date: days_ago(0),
        },
        Entry {
            id: "d2".to_string(),
            subject: "Physics".to_string(),
            minutes: 30,
            remarks: "Worked on thermodynamics".to_string(),
            date: days_ago(1),
        },
        Entry {
            id: "d3".to_string(),
            subject: "Chemistry".to_string(),
            minutes: 20,
            remarks: "Revision of acids".to_string(),
            date: days_ago(2),
        },
    ]
}
