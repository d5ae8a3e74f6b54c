//! Foreground activity monitoring.
//!
//! Opens the activity database, discards sessions an interrupted run left
//! open, and records new ones until SIGINT/SIGTERM. A database that cannot
//! be opened is fatal; unreadable settings fall back to defaults.

use crate::db::activities::Activities;
use crate::libs::config::{Config, CONFIG_FILE_NAME};
use crate::libs::daemon;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::monitor::Monitor;
use crate::libs::tracker::Tracker;
use crate::msg_error_anyhow;
use anyhow::Result;
use clap::Args;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Print a status line every refresh interval
    #[arg(short, long)]
    status: bool,
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    let activities = Activities::new().map_err(|e| msg_error_anyhow!(Message::DbConnectionFailed(format!("{:#}", e))))?;
    let monitor_config = Config::load_or_default().monitor();

    let tracker = Tracker::new(Arc::new(activities), monitor_config.threshold_seconds);
    tracker.cleanup_unfinished()?;

    let mut monitor = Monitor::new(monitor_config, tracker).with_status(args.status);
    if let Ok(path) = DataStorage::new().get_path(CONFIG_FILE_NAME) {
        monitor = monitor.with_config_reload(path);
    }

    daemon::run_with_signal_handling(monitor).await
}
