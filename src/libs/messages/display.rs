//! Display implementation for workpulse application messages.
//!
//! All user-facing text lives here, so commands and library code only ever
//! deal with `Message` variants and their typed parameters.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleMonitor => "Monitor settings".to_string(),
            Message::ConfigLoadFailed(error) => format!("Failed to load settings, using defaults: {}", error),
            Message::ConfigThresholdUpdated(seconds) => format!("Idle threshold set to {} seconds", seconds),

            // === ACTIVITY MESSAGES ===
            Message::ActivityStarted { kind, start } => format!("Activity started: kind={}, start={}", kind, start),
            Message::ActivityStopped { id, end } => format!("Activity {} stopped at {}", id, end),
            Message::ActivityStartFailed(error) => format!("Failed to start activity: {}", error),
            Message::ActivityCloseFailed(error) => format!("Failed to close activity: {}", error),
            Message::ActivityNotFound(id) => format!("Activity record with ID {} not found", id),
            Message::ActivitiesLoaded(count) => format!("Loaded {} activity record(s)", count),
            Message::UnfinishedActivitiesCleaned(count) => format!("Removed {} unfinished activity record(s)", count),
            Message::UnknownActivityKind(kind) => format!("Skipping activity with unknown kind '{}'", kind),
            Message::InvalidActivityTimestamp(ts) => format!("Skipping activity with invalid timestamp {}", ts),

            // === MONITOR MESSAGES ===
            Message::MonitorStarted {
                idle_threshold,
                poll_interval,
            } => format!(
                "Monitor is running (idle threshold: {}s, poll interval: {}ms)",
                idle_threshold, poll_interval
            ),
            Message::MonitorExitedNormally => "Monitor exited normally".to_string(),
            Message::MonitorShuttingDown => "Shutting down monitor...".to_string(),
            Message::MonitorError(error) => format!("Monitor error: {}", error),
            Message::MonitorTaskPanicked(error) => format!("Monitor task panicked: {}", error),
            Message::MonitorStatus {
                active,
                last_input,
                today_total,
            } => format!(
                "{} | last input: {} | today: {}",
                if *active { "active" } else { "idle" },
                last_input,
                today_total
            ),
            Message::ErrorInRdevListener(error) => format!("Error in rdev listener: {}. Retrying in 1 second...", error),

            // === WATCHER MESSAGES ===
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down gracefully...".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down gracefully...".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down gracefully...".to_string(),
            Message::WatcherCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::WatcherSignalHandlingNotSupported => "Signal handling is not supported on this platform".to_string(),
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),

            // === REPORT MESSAGES ===
            Message::StatsTitle => "Daily activity".to_string(),
            Message::TodayTitle(date) => format!("Activity for {}", date),
            Message::TimelineTitle => "Timeline".to_string(),
            Message::NoActivityRecorded => "No activity recorded yet".to_string(),

            // === DATABASE MESSAGES ===
            Message::DbConnectionFailed(error) => format!("Failed to open activity database: {}", error),

            // === PROMPTS ===
            Message::PromptIdleThreshold => "Idle threshold (in seconds)".to_string(),
            Message::PromptPollInterval => "Idle check interval (in milliseconds)".to_string(),
            Message::PromptRefreshInterval => "Status refresh interval (in milliseconds)".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::MigrationsUpToDate(version) => format!("Database schema is up to date (v{})", version),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
        };

        write!(f, "{}", text)
    }
}
