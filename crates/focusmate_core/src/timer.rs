//! Tick-driven focus countdown.
//!
//! The caller owns the clock: it invokes `tick()` once per elapsed second and
//! renders the returned label.

use std::time::Duration;

/// Default focus block length.
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
/// Shown once the countdown completes.
pub const TIMER_FINISHED_MESSAGE: &str = "Timer finished! Add your session.";

/// Result of one countdown step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTick {
    /// Countdown still running; `label` is the time left before this tick.
    Running { label: String },
    Finished,
}

/// Countdown over whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    remaining_secs: u64,
    finished: bool,
}

impl FocusTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            remaining_secs: duration.as_secs(),
            finished: false,
        }
    }

    pub fn from_minutes(minutes: u32) -> Self {
        Self::new(Duration::from_secs(u64::from(minutes) * 60))
    }

    /// Seconds left before the next tick.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances by one second.
    ///
    /// Yields the label for every remaining second down to `0:00`; the tick
    /// showing `0:00` marks the timer finished and later calls return `Finished`.
    pub fn tick(&mut self) -> TimerTick {
        if self.finished {
            return TimerTick::Finished;
        }
        let label = format_clock(self.remaining_secs);
        if self.remaining_secs == 0 {
            self.finished = true;
        } else {
            self.remaining_secs -= 1;
        }
        TimerTick::Running { label }
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_FOCUS_MINUTES)
    }
}

/// Formats seconds as `m:ss`.
pub fn format_clock(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::{format_clock, FocusTimer, TimerTick};
    use std::time::Duration;

    #[test]
    fn format_clock_pads_seconds() {
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(0), "0:00");
    }

    #[test]
    fn tick_counts_down_then_finishes() {
        let mut timer = FocusTimer::new(Duration::from_secs(2));
        assert_eq!(
            timer.tick(),
            TimerTick::Running {
                label: "0:02".to_string()
            }
        );
        assert_eq!(
            timer.tick(),
            TimerTick::Running {
                label: "0:01".to_string()
            }
        );
        assert_eq!(timer.remaining_secs(), 0);
        assert!(!timer.is_finished());

        assert_eq!(
            timer.tick(),
            TimerTick::Running {
                label: "0:00".to_string()
            }
        );
        assert_eq!(timer.tick(), TimerTick::Finished);
        assert!(timer.is_finished());
        assert_eq!(timer.tick(), TimerTick::Finished);
    }
}
