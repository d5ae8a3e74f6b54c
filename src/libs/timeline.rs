//! Hour-by-hour view of one day's activity.
//!
//! Each of the 24 slots holds the number of active seconds that fall inside
//! that local hour. Intervals crossing an hour (or midnight) are split, and
//! open intervals are measured the same way as in the daily aggregates.

use crate::libs::activity::ActivityInterval;
use crate::libs::stats::effective_duration;
use chrono::{DateTime, Local, NaiveDate};

pub const HOURS: usize = 24;
const SECONDS_PER_HOUR: i64 = 3600;

/// Shade characters from empty to a fully active hour.
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    pub date: NaiveDate,
    /// Active seconds per local hour.
    pub hours: [i64; HOURS],
}

impl Timeline {
    pub fn build(
        date: NaiveDate,
        intervals: &[ActivityInterval],
        now: DateTime<Local>,
        active: bool,
        last_input: Option<DateTime<Local>>,
    ) -> Self {
        let mut hours = [0i64; HOURS];
        let bounds: Vec<Option<(DateTime<Local>, DateTime<Local>)>> = (0..HOURS as u32).map(|h| hour_bounds(date, h)).collect();

        for interval in intervals {
            let Some(duration) = effective_duration(interval, now, active, last_input) else {
                continue;
            };
            let start = interval.start;
            let end = start + duration;

            for (slot, bound) in hours.iter_mut().zip(&bounds) {
                let Some((hour_start, hour_end)) = bound else {
                    continue;
                };
                let overlap_start = start.max(*hour_start);
                let overlap_end = end.min(*hour_end);
                if overlap_end > overlap_start {
                    *slot += overlap_end.signed_duration_since(overlap_start).num_seconds();
                }
            }
        }

        for slot in hours.iter_mut() {
            *slot = (*slot).min(SECONDS_PER_HOUR);
        }

        Self { date, hours }
    }

    pub fn total_seconds(&self) -> i64 {
        self.hours.iter().sum()
    }

    /// One shade character per hour.
    pub fn bar(&self) -> String {
        self.hours.iter().map(|&secs| shade(secs)).collect()
    }

    /// Hour ruler aligned with [`Timeline::bar`].
    pub fn ruler() -> String {
        (0..HOURS)
            .map(|h| if h % 6 == 0 { format!("{:<6}", h) } else { String::new() })
            .collect()
    }
}

fn shade(secs: i64) -> char {
    if secs <= 0 {
        return SHADES[0];
    }
    let levels = (SHADES.len() - 1) as i64;
    let level = ((secs * levels + SECONDS_PER_HOUR - 1) / SECONDS_PER_HOUR).clamp(1, levels);
    SHADES[level as usize]
}

fn hour_bounds(date: NaiveDate, hour: u32) -> Option<(DateTime<Local>, DateTime<Local>)> {
    let start = date.and_hms_opt(hour, 0, 0)?.and_local_timezone(Local).earliest()?;
    let end = match hour + 1 {
        24 => date.succ_opt()?.and_hms_opt(0, 0, 0)?,
        next => date.and_hms_opt(next, 0, 0)?,
    }
    .and_local_timezone(Local)
    .earliest()?;
    Some((start, end))
}
