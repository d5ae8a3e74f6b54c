//! Activity session state machine.
//!
//! The tracker is either **idle** (no open interval) or **active** (exactly one
//! open interval). Input events move it from idle to active by opening a new
//! interval; the idle checker moves it back once no input has arrived for
//! longer than the idle threshold, closing the interval at the instant of the
//! last input rather than at the instant the gap was noticed.
//!
//! ## Concurrency
//!
//! [`Tracker`] is a cheap handle over one `Arc<Mutex<TrackerState>>`; the input
//! thread, the idle checker and any status reader each hold a clone. Store
//! calls never run under the state lock:
//!
//! - opening: the idle → *opening* transition happens under the lock, so only
//!   one caller can reach the insert; the result is committed (or rolled back)
//!   under the lock afterwards
//! - closing: the interval is closed in memory and the tracker set idle under
//!   the lock; the store update follows, and its failure is only logged
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workpulse::db::activities::Activities;
//! use workpulse::libs::activity::ActivityKind;
//! use workpulse::libs::tracker::Tracker;
//!
//! let tracker = Tracker::new(Arc::new(Activities::new()?), 15);
//! tracker.cleanup_unfinished()?;
//! tracker.record_input(ActivityKind::Mouse)?;
//! tracker.idle_check();
//! for day in tracker.daily_aggregates() {
//!     println!("{}: {}s", day.date, day.total.num_seconds());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::activities::ActivityStore;
use crate::libs::activity::{truncate_to_second, ActivityInterval, ActivityKind};
use crate::libs::error::{TrackerError, TrackerResult};
use crate::libs::messages::Message;
use crate::libs::stats::{self, DailyAggregate};
use crate::{msg_debug, msg_error, msg_info};
use chrono::{DateTime, Duration, Local, NaiveDate};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// An insert for a new interval is in flight.
    Opening,
    /// The interval with this store identity is open.
    Active { id: i64 },
}

#[derive(Debug)]
struct TrackerState {
    phase: Phase,
    last_input: Option<DateTime<Local>>,
    threshold: Duration,
    intervals: Vec<ActivityInterval>,
}

impl TrackerState {
    fn touch(&mut self, now: DateTime<Local>) {
        self.last_input = Some(match self.last_input {
            Some(last) if last > now => last,
            _ => now,
        });
    }

    /// Closes the open interval in memory at the last input instant and
    /// returns what has to be written to the store.
    fn close_open(&mut self) -> Option<(i64, DateTime<Local>)> {
        let Phase::Active { id } = self.phase else {
            return None;
        };
        self.phase = Phase::Idle;

        let end = truncate_to_second(self.last_input?);
        if let Some(interval) = self.intervals.iter_mut().rev().find(|i| i.id == Some(id)) {
            interval.close(end);
            return Some((id, interval.end.unwrap_or(end)));
        }
        Some((id, end))
    }
}

#[derive(Clone)]
pub struct Tracker {
    state: Arc<Mutex<TrackerState>>,
    store: Arc<dyn ActivityStore>,
}

impl Tracker {
    pub fn new(store: Arc<dyn ActivityStore>, threshold_seconds: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(TrackerState {
                phase: Phase::Idle,
                last_input: None,
                threshold: threshold_duration(threshold_seconds),
                intervals: Vec::new(),
            })),
            store,
        }
    }

    /// Registers an input event happening now.
    pub fn record_input(&self, kind: ActivityKind) -> TrackerResult<bool> {
        self.record_input_at(kind, Local::now())
    }

    /// Registers an input event at `now`.
    ///
    /// Opens a new interval when the tracker is idle and returns `true` in that
    /// case. While a session is running only the last input instant moves; the
    /// kind of the open interval stays whatever started the session.
    ///
    /// A failed insert is returned to the caller and leaves the tracker idle
    /// with its cache and last input untouched.
    pub fn record_input_at(&self, kind: ActivityKind, now: DateTime<Local>) -> TrackerResult<bool> {
        {
            let mut state = self.state.lock();
            match state.phase {
                Phase::Active { .. } | Phase::Opening => {
                    state.touch(now);
                    return Ok(false);
                }
                Phase::Idle => state.phase = Phase::Opening,
            }
        }

        let mut interval = ActivityInterval::open(now, kind);
        let saved = self.store.save(&interval);

        let mut state = self.state.lock();
        match saved {
            Ok(id) => {
                interval.id = Some(id);
                msg_info!(Message::ActivityStarted {
                    kind: kind.to_string(),
                    start: interval.start.format("%Y-%m-%d %H:%M:%S").to_string(),
                });
                state.intervals.push(interval);
                state.phase = Phase::Active { id };
                state.touch(now);
                Ok(true)
            }
            Err(e) => {
                state.phase = Phase::Idle;
                Err(TrackerError::Persistence(e))
            }
        }
    }

    /// One tick of the idle checker, evaluated now.
    pub fn idle_check(&self) -> bool {
        self.idle_check_at(Local::now())
    }

    /// Closes the open interval if more than the idle threshold has passed
    /// between the last input and `now`. Returns `true` if an interval was
    /// closed.
    ///
    /// The tracker becomes idle even when the store update fails; the failure
    /// is logged and the row stays open until the next cleanup.
    pub fn idle_check_at(&self, now: DateTime<Local>) -> bool {
        let closed = {
            let mut state = self.state.lock();
            let Phase::Active { .. } = state.phase else {
                return false;
            };
            let Some(last_input) = state.last_input else {
                return false;
            };
            if now.signed_duration_since(last_input) <= state.threshold {
                return false;
            }
            state.close_open()
        };

        if let Some((id, end)) = closed {
            self.persist_close(id, end);
        }
        true
    }

    /// Closes a running session at its last input. Used on graceful exit.
    pub fn shutdown(&self) -> bool {
        let closed = self.state.lock().close_open();
        match closed {
            Some((id, end)) => {
                self.persist_close(id, end);
                true
            }
            None => false,
        }
    }

    fn persist_close(&self, id: i64, end: DateTime<Local>) {
        match self.store.close(id, end) {
            Ok(()) => msg_info!(Message::ActivityStopped {
                id,
                end: end.format("%Y-%m-%d %H:%M:%S").to_string(),
            }),
            Err(e) => msg_error!(Message::ActivityCloseFailed(format!("{:#}", e))),
        }
    }

    /// Replaces the in-memory cache with everything in the store.
    pub fn load_activities(&self) -> TrackerResult<usize> {
        let intervals = self.store.list_all().map_err(TrackerError::Persistence)?;
        let count = intervals.len();
        self.state.lock().intervals = intervals;
        msg_debug!(Message::ActivitiesLoaded(count));
        Ok(count)
    }

    /// Discards intervals left open by a previous run, then reloads the cache.
    ///
    /// Their real end is unknown, so they are deleted rather than closed.
    pub fn cleanup_unfinished(&self) -> TrackerResult<usize> {
        let removed = self.store.delete_open().map_err(TrackerError::Persistence)?;
        if removed > 0 {
            msg_info!(Message::UnfinishedActivitiesCleaned(removed));
        }
        self.load_activities()?;
        Ok(removed)
    }

    /// Today's intervals as stored, oldest first.
    pub fn today_intervals(&self) -> TrackerResult<Vec<ActivityInterval>> {
        self.intervals_for_date(Local::now().date_naive())
    }

    pub fn intervals_for_date(&self, date: NaiveDate) -> TrackerResult<Vec<ActivityInterval>> {
        let Some((start, end)) = stats::day_bounds(date) else {
            return Ok(Vec::new());
        };
        self.store.list_range(start, end).map_err(TrackerError::Persistence)
    }

    pub fn daily_aggregates(&self) -> Vec<DailyAggregate> {
        self.daily_aggregates_at(Local::now())
    }

    /// Aggregates the cached intervals as seen at `now`.
    pub fn daily_aggregates_at(&self, now: DateTime<Local>) -> Vec<DailyAggregate> {
        let state = self.state.lock();
        let active = matches!(state.phase, Phase::Active { .. });
        stats::aggregate(&state.intervals, now, active, state.last_input)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state.lock().phase, Phase::Active { .. })
    }

    pub fn last_input(&self) -> Option<DateTime<Local>> {
        self.state.lock().last_input
    }

    pub fn threshold(&self) -> Duration {
        self.state.lock().threshold
    }

    /// Changes the idle threshold; the next idle check uses the new value.
    /// Returns `false` if the threshold was already set to `seconds`.
    pub fn update_threshold(&self, seconds: u64) -> bool {
        let threshold = threshold_duration(seconds);
        let mut state = self.state.lock();
        let changed = state.threshold != threshold;
        state.threshold = threshold;
        changed
    }

    /// Snapshot of the cached intervals.
    pub fn intervals(&self) -> Vec<ActivityInterval> {
        self.state.lock().intervals.clone()
    }
}

fn threshold_duration(seconds: u64) -> Duration {
    Duration::seconds(i64::try_from(seconds).unwrap_or(i64::MAX).min(i64::MAX / 1_000))
}
