//! Progress analysis over the last 30 days.

use crate::model::entry::Entry;
use crate::stats::{
    recent_entries, subject_breakdown, top_subject, total_minutes_of, weakest_subjects,
    LOOKBACK_DAYS, SCAN_CAP, WEAK_SUBJECT_COUNT,
};
use chrono::NaiveDate;
use std::collections::BTreeSet;

const NO_ENTRIES: &str =
    "No entries yet — start by recording a 25-minute focused session!";
const NO_RECENT_SESSIONS: &str = "No sessions in the last 30 days.";

/// Summarizes the recent sessions in `entries` as of `reference`.
///
/// Considers the first 200 entries dated within 30 days. The average is per
/// distinct day with at least one session, rounded half up. The weak list is
/// the two lowest subjects and may repeat the top subject.
pub fn analyze_progress(entries: &[Entry], reference: NaiveDate) -> String {
    if entries.is_empty() {
        return NO_ENTRIES.to_string();
    }

    let recent = recent_entries(entries, reference, LOOKBACK_DAYS, SCAN_CAP);
    if recent.is_empty() {
        return NO_RECENT_SESSIONS.to_string();
    }

    let total = total_minutes_of(recent.iter().copied());
    let active_days = recent
        .iter()
        .map(|entry| entry.date.as_str())
        .collect::<BTreeSet<_>>()
        .len()
        .max(1);
    let average = (total as f64 / active_days as f64).round() as u64;

    let breakdown = subject_breakdown(recent.iter().copied());
    let top = top_subject(&breakdown).unwrap_or("—");
    let weak = weakest_subjects(&breakdown, WEAK_SUBJECT_COUNT).join(", ");
    let weak = if weak.is_empty() { "none" } else { weak.as_str() };

    format!(
        "In the last {LOOKBACK_DAYS} days you logged {total} minutes (avg {average} min/day). \
         Your most-studied subject: {top}. \
         Consider adding short daily sessions for subjects you study less: {weak}. \
         Keep using short focused sessions and review weekly."
    )
}
