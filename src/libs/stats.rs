//! Per-day aggregation of activity intervals.
//!
//! [`aggregate`] is a pure function of its arguments: the interval set, the
//! instant treated as "now", whether a session is currently active, and the
//! last recorded input. It never reads the clock itself, so the same inputs
//! always produce the same output.
//!
//! ## Rules
//!
//! - Intervals are grouped by the local calendar date of their start.
//! - Intervals starting before [`MIN_PLAUSIBLE_YEAR`] are ignored.
//! - An open interval is measured up to `now` while the tracker is active,
//!   otherwise up to the last recorded input.
//! - Intervals with a negative (or unmeasurable) duration are ignored.
//! - The result is sorted newest date first.

use crate::libs::activity::{ActivityInterval, ActivityKind};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use std::collections::HashMap;

/// Starts before this year are treated as corrupt data.
pub const MIN_PLAUSIBLE_YEAR: i32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub total: Duration,
    pub mouse: Duration,
    pub keyboard: Duration,
}

impl DailyAggregate {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total: Duration::zero(),
            mouse: Duration::zero(),
            keyboard: Duration::zero(),
        }
    }

    fn add(&mut self, kind: ActivityKind, duration: Duration) {
        self.total = self.total + duration;
        match kind {
            ActivityKind::Mouse => self.mouse = self.mouse + duration,
            ActivityKind::Keyboard => self.keyboard = self.keyboard + duration,
        }
    }
}

/// Measured length of `interval` as seen at `now`.
///
/// Returns `None` when the interval cannot contribute to an aggregate: an
/// open interval with no recorded input to measure against, or any negative
/// result.
pub fn effective_duration(
    interval: &ActivityInterval,
    now: DateTime<Local>,
    active: bool,
    last_input: Option<DateTime<Local>>,
) -> Option<Duration> {
    let duration = match interval.end {
        Some(end) => end.signed_duration_since(interval.start),
        None if active => now.signed_duration_since(interval.start),
        None => last_input?.signed_duration_since(interval.start),
    };

    if duration < Duration::zero() {
        return None;
    }
    Some(duration)
}

/// Local-time span `[midnight, next midnight)` of `date`.
pub fn day_bounds(date: NaiveDate) -> Option<(DateTime<Local>, DateTime<Local>)> {
    let start = date.and_hms_opt(0, 0, 0)?.and_local_timezone(Local).earliest()?;
    let end = date.succ_opt()?.and_hms_opt(0, 0, 0)?.and_local_timezone(Local).earliest()?;
    Some((start, end))
}

pub fn aggregate(
    intervals: &[ActivityInterval],
    now: DateTime<Local>,
    active: bool,
    last_input: Option<DateTime<Local>>,
) -> Vec<DailyAggregate> {
    let mut by_date: HashMap<NaiveDate, DailyAggregate> = HashMap::new();

    for interval in intervals {
        if interval.start.year() < MIN_PLAUSIBLE_YEAR {
            continue;
        }
        let Some(duration) = effective_duration(interval, now, active, last_input) else {
            continue;
        };

        let date = interval.start.date_naive();
        by_date
            .entry(date)
            .or_insert_with(|| DailyAggregate::empty(date))
            .add(interval.kind, duration);
    }

    let mut result: Vec<DailyAggregate> = by_date.into_values().collect();
    result.sort_by(|a, b| b.date.cmp(&a.date));
    result
}
