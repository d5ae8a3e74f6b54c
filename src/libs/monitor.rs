//! Input monitoring and the background tasks of `watch`.
//!
//! A [`Monitor`] drives one shared [`Tracker`] from several places:
//!
//! - a dedicated OS thread running `rdev::listen`, feeding every keyboard and
//!   mouse event into [`Tracker::record_input`]
//! - the idle checker, a tokio interval calling [`Tracker::idle_check`]
//! - optionally a status line printed every `refresh_interval`
//! - optionally a settings reloader picking up a changed idle threshold
//!
//! All tasks stop once the shutdown channel flips to `true`; the open session
//! is then closed at its last input.

use crate::libs::activity::ActivityKind;
use crate::libs::config::{Config, MonitorConfig};
use crate::libs::formatter::{format_clock, format_duration};
use crate::libs::messages::Message;
use crate::libs::tracker::Tracker;
use crate::{msg_debug, msg_error, msg_info, msg_print};
use anyhow::Result;
use chrono::{Duration as ChronoDuration, Local};
use rdev::{listen, Event, EventType};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// How long the input listener waits before re-registering after a failure.
const LISTENER_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Cadence of the settings reloader.
const CONFIG_RELOAD_INTERVAL: Duration = Duration::from_secs(5);

/// Maps an OS input event to the kind of activity it represents.
///
/// Pointer motion, button and wheel events count as mouse activity, key
/// presses and releases as keyboard activity.
pub fn activity_kind(event_type: &EventType) -> Option<ActivityKind> {
    match event_type {
        EventType::MouseMove { .. } | EventType::ButtonPress(_) | EventType::ButtonRelease(_) | EventType::Wheel { .. } => {
            Some(ActivityKind::Mouse)
        }
        EventType::KeyPress(_) | EventType::KeyRelease(_) => Some(ActivityKind::Keyboard),
    }
}

pub struct Monitor {
    config: MonitorConfig,
    tracker: Tracker,
    status: bool,
    config_path: Option<PathBuf>,
}

impl Monitor {
    pub fn new(config: MonitorConfig, tracker: Tracker) -> Self {
        Self {
            config,
            tracker,
            status: false,
            config_path: None,
        }
    }

    /// Prints a status line every `refresh_interval` while running.
    pub fn with_status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }

    /// Re-reads the settings file periodically and applies threshold changes.
    pub fn with_config_reload(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Runs until `shutdown` turns `true` (or its sender is dropped), then
    /// closes the running session.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        msg_info!(Message::MonitorStarted {
            idle_threshold: self.config.threshold_seconds,
            poll_interval: self.config.poll_interval,
        });

        spawn_input_listener(self.tracker.clone(), shutdown.clone());

        let mut tasks = vec![spawn_idle_checker(
            self.tracker.clone(),
            millis(self.config.poll_interval),
            shutdown.clone(),
        )];
        if self.status {
            tasks.push(spawn_status_reporter(
                self.tracker.clone(),
                millis(self.config.refresh_interval),
                shutdown.clone(),
            ));
        }
        if let Some(path) = self.config_path.clone() {
            tasks.push(spawn_config_reloader(
                self.tracker.clone(),
                path,
                CONFIG_RELOAD_INTERVAL,
                shutdown.clone(),
            ));
        }

        while !*shutdown.borrow() {
            if shutdown.changed().await.is_err() {
                break;
            }
        }

        for task in tasks {
            if let Err(e) = task.await {
                msg_error!(Message::MonitorTaskPanicked(e.to_string()));
            }
        }

        self.tracker.shutdown();
        Ok(())
    }
}

/// Starts the OS-level input listener on its own thread.
///
/// `rdev::listen` blocks for the lifetime of the hook, so it cannot live on
/// the tokio runtime. When the hook fails it is re-registered after a short
/// delay. Events arriving after shutdown are ignored.
pub fn spawn_input_listener(tracker: Tracker, shutdown: watch::Receiver<bool>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || loop {
        let tracker = tracker.clone();
        let stop = shutdown.clone();
        let result = listen(move |event: Event| {
            if *stop.borrow() {
                return;
            }
            if let Some(kind) = activity_kind(&event.event_type) {
                if let Err(e) = tracker.record_input(kind) {
                    msg_error!(Message::ActivityStartFailed(e.to_string()));
                }
            }
        });

        match result {
            Err(e) => {
                msg_error!(Message::ErrorInRdevListener(format!("{:?}", e)));
                std::thread::sleep(LISTENER_RETRY_DELAY);
            }
            Ok(()) => break,
        }
        if *shutdown.borrow() {
            break;
        }
    })
}

/// Runs [`Tracker::idle_check`] every `period` until shutdown.
pub fn spawn_idle_checker(tracker: Tracker, period: Duration, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
    spawn_periodic(period, shutdown, move || {
        tracker.idle_check();
    })
}

/// Prints the tracker state every `period` until shutdown.
pub fn spawn_status_reporter(tracker: Tracker, period: Duration, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
    spawn_periodic(period, shutdown, move || {
        msg_print!(status_line(&tracker));
    })
}

/// Applies the idle threshold from `path` whenever it differs from the
/// tracker's current one. Unreadable settings keep the current threshold.
pub fn spawn_config_reloader(
    tracker: Tracker,
    path: PathBuf,
    period: Duration,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    spawn_periodic(period, shutdown, move || {
        reload_threshold(&tracker, &path);
    })
}

/// One reload pass; returns `true` when the threshold changed.
pub fn reload_threshold(tracker: &Tracker, path: &Path) -> bool {
    let threshold_seconds = match Config::read_from(path) {
        Ok(config) => config.monitor().threshold_seconds,
        Err(e) => {
            msg_debug!(Message::ConfigLoadFailed(format!("{:#}", e)));
            return false;
        }
    };

    if !tracker.update_threshold(threshold_seconds) {
        return false;
    }
    msg_info!(Message::ConfigThresholdUpdated(threshold_seconds));
    true
}

/// Status line content for `watch --status`.
pub fn status_line(tracker: &Tracker) -> Message {
    let now = Local::now();
    let today = now.date_naive();
    let today_total = tracker
        .daily_aggregates_at(now)
        .into_iter()
        .find(|day| day.date == today)
        .map_or_else(ChronoDuration::zero, |day| day.total);

    Message::MonitorStatus {
        active: tracker.is_active(),
        last_input: tracker.last_input().map_or_else(|| "-".to_string(), |t| format_clock(&t)),
        today_total: format_duration(&today_total),
    }
}

fn spawn_periodic<F>(period: Duration, mut shutdown: watch::Receiver<bool>, mut tick: F) -> JoinHandle<()>
where
    F: FnMut() + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                _ = interval.tick() => tick(),
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
    })
}

fn millis(value: u64) -> Duration {
    Duration::from_millis(value.max(1))
}
