//! Per-subject breakdown over a recent window and its rankings.
//!
//! # Invariants
//! - Window membership uses whole calendar days: an entry dated `d` is recent
//!   when `reference - d < lookback_days` days. Future dates count as recent.
//! - Rankings break ties by subject name ascending, so results are stable.

use crate::model::entry::Entry;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Mapping from subject to summed minutes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectBreakdown {
    totals: BTreeMap<String, u64>,
}

impl SubjectBreakdown {
    pub fn get(&self, subject: &str) -> Option<u64> {
        self.totals.get(subject).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Subjects in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.totals
            .iter()
            .map(|(subject, minutes)| (subject.as_str(), *minutes))
    }

    /// Most minutes first; ties by subject ascending.
    pub fn ranked_descending(&self) -> Vec<(&str, u64)> {
        self.ranked(|left, right| right.cmp(&left))
    }

    /// Fewest minutes first; ties by subject ascending.
    pub fn ranked_ascending(&self) -> Vec<(&str, u64)> {
        self.ranked(|left, right| left.cmp(&right))
    }

    fn ranked(&self, by_minutes: impl Fn(u64, u64) -> Ordering) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        ranked.sort_by(|left, right| by_minutes(left.1, right.1).then_with(|| left.0.cmp(right.0)));
        ranked
    }
}

impl<'a> FromIterator<&'a Entry> for SubjectBreakdown {
    fn from_iter<I: IntoIterator<Item = &'a Entry>>(iter: I) -> Self {
        let mut totals = BTreeMap::new();
        for entry in iter {
            *totals.entry(entry.subject.clone()).or_insert(0) += u64::from(entry.minutes);
        }
        Self { totals }
    }
}

/// Entries among the first `cap` (store order) dated within `lookback_days`
/// of `reference`. Entries with unparsable dates are skipped.
pub fn recent_entries(
    entries: &[Entry],
    reference: NaiveDate,
    lookback_days: u32,
    cap: usize,
) -> Vec<&Entry> {
    entries
        .iter()
        .take(cap)
        .filter(|entry| {
            entry.parsed_date().is_some_and(|date| {
                (reference - date).num_days() < i64::from(lookback_days)
            })
        })
        .collect()
}

pub fn subject_breakdown<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> SubjectBreakdown {
    entries.into_iter().collect()
}

/// Breakdown of `recent_entries(entries, reference, lookback_days, cap)`.
pub fn recent_subject_breakdown(
    entries: &[Entry],
    reference: NaiveDate,
    lookback_days: u32,
    cap: usize,
) -> SubjectBreakdown {
    subject_breakdown(recent_entries(entries, reference, lookback_days, cap))
}

/// Subject with the most minutes, `None` for an empty breakdown.
pub fn top_subject(breakdown: &SubjectBreakdown) -> Option<&str> {
    breakdown
        .ranked_descending()
        .first()
        .map(|(subject, _)| *subject)
}

/// The `n` subjects with the fewest minutes, ascending.
///
/// The top subject is not excluded, so with one or two subjects it shows up
/// here as well.
pub fn weakest_subjects(breakdown: &SubjectBreakdown, n: usize) -> Vec<&str> {
    breakdown
        .ranked_ascending()
        .into_iter()
        .take(n)
        .map(|(subject, _)| subject)
        .collect()
}
