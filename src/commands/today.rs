//! Today's sessions as a table plus an hour-by-hour timeline.

use crate::db::activities::Activities;
use crate::libs::config::DEFAULT_IDLE_THRESHOLD;
use crate::libs::formatter::FormatIntervals;
use crate::libs::messages::Message;
use crate::libs::stats::effective_duration;
use crate::libs::timeline::Timeline;
use crate::libs::tracker::Tracker;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::{Duration, Local};
use std::sync::Arc;

pub fn cmd() -> Result<()> {
    let tracker = Tracker::new(Arc::new(Activities::new()?), DEFAULT_IDLE_THRESHOLD);
    let now = Local::now();
    let today = now.date_naive();

    let intervals = tracker.today_intervals()?;
    if intervals.is_empty() {
        msg_info!(Message::NoActivityRecorded);
        return Ok(());
    }

    let (active, last_input) = (tracker.is_active(), tracker.last_input());
    let total = intervals
        .iter()
        .filter_map(|interval| effective_duration(interval, now, active, last_input))
        .fold(Duration::zero(), |acc, d| acc + d);

    msg_print!(Message::TodayTitle(today.format("%B %-d, %Y").to_string()), true);
    View::intervals(&intervals.format(now, active, last_input), &total)?;

    msg_print!(Message::TimelineTitle, true);
    View::timeline(&Timeline::build(today, &intervals, now, active, last_input))
}
