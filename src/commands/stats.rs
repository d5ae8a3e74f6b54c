//! Active time per day, newest first.

use crate::db::activities::Activities;
use crate::libs::config::DEFAULT_IDLE_THRESHOLD;
use crate::libs::messages::Message;
use crate::libs::tracker::Tracker;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Show only the most recent N days
    #[arg(short, long)]
    days: Option<usize>,
}

/// Sessions still open in a running `watch` have no known end from here and
/// are left out of the totals.
pub fn cmd(args: StatsArgs) -> Result<()> {
    let tracker = Tracker::new(Arc::new(Activities::new()?), DEFAULT_IDLE_THRESHOLD);
    tracker.load_activities()?;

    let mut days = tracker.daily_aggregates();
    if let Some(limit) = args.days {
        days.truncate(limit);
    }

    if days.is_empty() {
        msg_info!(Message::NoActivityRecorded);
        return Ok(());
    }

    msg_print!(Message::StatsTitle, true);
    View::stats(&days)
}
