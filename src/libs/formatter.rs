//! Text formatting for durations, instants and interval rows.
//!
//! Durations are shown as `HH:MM:SS`. Hours are not wrapped at 24, so a
//! multi-day total stays readable, and negative durations render as zero.
//!
//! ```rust
//! use workpulse::libs::formatter::format_duration;
//! use chrono::Duration;
//!
//! assert_eq!(format_duration(&Duration::seconds(3725)), "01:02:05");
//! assert_eq!(format_duration(&Duration::hours(-1)), "00:00:00");
//! ```

use crate::libs::activity::ActivityInterval;
use crate::libs::stats::effective_duration;
use chrono::{DateTime, Duration, Local};

/// An interval pre-rendered for table output.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedInterval {
    /// Position in the listing, starting at 1.
    pub id: usize,
    pub start: String,
    /// `-` while the interval is open.
    pub end: String,
    pub kind: String,
    /// `--:--:--` when the duration cannot be measured.
    pub duration: String,
}

pub fn format_duration(duration: &Duration) -> String {
    let total = duration.num_seconds().max(0);
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

pub fn format_clock(instant: &DateTime<Local>) -> String {
    instant.format("%H:%M:%S").to_string()
}

pub trait FormatIntervals {
    /// Renders intervals for display, measuring open ones as of `now`.
    fn format(&self, now: DateTime<Local>, active: bool, last_input: Option<DateTime<Local>>) -> Vec<FormattedInterval>;
}

impl FormatIntervals for [ActivityInterval] {
    fn format(&self, now: DateTime<Local>, active: bool, last_input: Option<DateTime<Local>>) -> Vec<FormattedInterval> {
        self.iter()
            .enumerate()
            .map(|(index, interval)| FormattedInterval {
                id: index + 1,
                start: format_clock(&interval.start),
                end: interval.end.map_or_else(|| "-".to_string(), |end| format_clock(&end)),
                kind: interval.kind.to_string(),
                duration: effective_duration(interval, now, active, last_input)
                    .map_or_else(|| "--:--:--".to_string(), |d| format_duration(&d)),
            })
            .collect()
    }
}
