//! Study feedback: keyword tips and the progress analysis sentence.
//!
//! # Responsibility
//! - Map a free-text question to one fixed tip.
//! - Summarize recent sessions into one human-readable paragraph.
//!
//! # Invariants
//! - Output depends only on the inputs; there is no model and no network call.

mod analysis;
mod canned;

pub use analysis::analyze_progress;
pub use canned::{canned_response, USAGE_PROMPT};

use std::time::Duration;

/// Cosmetic pause before showing a keyword tip.
pub const THINKING_DELAY_CANNED: Duration = Duration::from_millis(500);
/// Cosmetic pause before showing the progress analysis.
pub const THINKING_DELAY_ANALYZE: Duration = Duration::from_millis(600);
