//! Aggregate views derived from an entry snapshot.
//!
//! # Responsibility
//! - Totals, the per-day chart series and per-subject breakdowns.
//! - Stay pure: callers pass the snapshot and the reference date in.

pub mod breakdown;
pub mod series;

pub use breakdown::{
    recent_entries, recent_subject_breakdown, subject_breakdown, top_subject, weakest_subjects,
    SubjectBreakdown,
};
pub use series::{daily_series, session_count, total_minutes, total_minutes_of, DailyTotal};

/// Days covered by the performance chart.
pub const CHART_WINDOW_DAYS: u32 = 30;
/// Longest window `daily_series` will produce.
pub const MAX_SERIES_DAYS: u32 = 3660;
/// Lookback used by the progress analysis.
pub const LOOKBACK_DAYS: u32 = 30;
/// Maximum number of most-recent entries scanned by the progress analysis.
pub const SCAN_CAP: usize = 200;
/// Number of weak subjects reported by the progress analysis.
pub const WEAK_SUBJECT_COUNT: usize = 2;
