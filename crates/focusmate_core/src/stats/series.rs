//! Totals and the rolling per-day series.

use crate::model::entry::{format_date, Entry};
use super::MAX_SERIES_DAYS;
use chrono::{Days, NaiveDate};

/// Summed minutes of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    /// Chart label in `MM-DD` form.
    pub label: String,
    pub minutes: u64,
}

pub fn total_minutes(entries: &[Entry]) -> u64 {
    total_minutes_of(entries)
}

/// Sum of `minutes` over any borrowed entry sequence.
pub fn total_minutes_of<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> u64 {
    entries
        .into_iter()
        .map(|entry| u64::from(entry.minutes))
        .sum()
}

pub fn session_count(entries: &[Entry]) -> usize {
    entries.len()
}

/// Per-day minute totals for the `window_days` days ending at `reference`
/// inclusive, oldest first.
///
/// Days match by exact string equality against the stored `YYYY-MM-DD`, so
/// entries with malformed dates never contribute. Returns
/// `min(window_days, MAX_SERIES_DAYS)` items; days before the earliest
/// representable date are left out.
pub fn daily_series(entries: &[Entry], window_days: u32, reference: NaiveDate) -> Vec<DailyTotal> {
    let window = window_days.min(MAX_SERIES_DAYS);
    (0..u64::from(window))
        .rev()
        .filter_map(|days_back| reference.checked_sub_days(Days::new(days_back)))
        .map(|date| {
            let key = format_date(date);
            let minutes = entries
                .iter()
                .filter(|entry| entry.date == key)
                .map(|entry| u64::from(entry.minutes))
                .sum();
            DailyTotal {
                date,
                label: date.format("%m-%d").to_string(),
                minutes,
            }
        })
        .collect()
}
