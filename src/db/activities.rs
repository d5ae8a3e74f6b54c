//! Durable storage for activity intervals.
//!
//! The tracker talks to storage only through the [`ActivityStore`] trait;
//! [`Activities`] is the SQLite implementation used by the application.
//!
//! ## Storage format
//!
//! - `start_time` / `end_time`: Unix seconds
//! - `end_time IS NULL` (or `0`, as written by older builds): open interval
//! - `activity_type`: `"mouse"` or `"keyboard"`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use workpulse::db::activities::{Activities, ActivityStore};
//! use workpulse::libs::activity::{ActivityInterval, ActivityKind};
//! use chrono::Local;
//!
//! let activities = Activities::new()?;
//! let id = activities.save(&ActivityInterval::open(Local::now(), ActivityKind::Mouse))?;
//! activities.close(id, Local::now())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::db::Db;
use crate::libs::activity::{from_unix, ActivityInterval, ActivityKind};
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_debug};
use anyhow::Result;
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;

const INSERT_ACTIVITY: &str = "INSERT INTO activities (start_time, end_time, activity_type) VALUES (?1, ?2, ?3)";
const UPDATE_END_TIME: &str = "UPDATE activities SET end_time = ?1 WHERE id = ?2";
const SELECT_ALL: &str = "SELECT id, start_time, end_time, activity_type FROM activities ORDER BY start_time DESC";
const SELECT_RANGE: &str = "SELECT id, start_time, end_time, activity_type FROM activities
    WHERE start_time >= ?1 AND start_time < ?2
    ORDER BY start_time ASC";
const DELETE_OPEN: &str = "DELETE FROM activities WHERE end_time IS NULL OR end_time = 0";

/// Persistence contract consumed by the tracker.
pub trait ActivityStore: Send + Sync {
    /// Inserts `interval` and returns its new identity.
    fn save(&self, interval: &ActivityInterval) -> Result<i64>;

    /// Sets the end instant of the interval with identity `id`.
    fn close(&self, id: i64, end: DateTime<Local>) -> Result<()>;

    /// Every stored interval, newest start first.
    fn list_all(&self) -> Result<Vec<ActivityInterval>>;

    /// Intervals starting in `[start, end)`, oldest first.
    fn list_range(&self, start: DateTime<Local>, end: DateTime<Local>) -> Result<Vec<ActivityInterval>>;

    /// Deletes every open interval and returns how many were removed.
    fn delete_open(&self) -> Result<usize>;
}

/// SQLite-backed [`ActivityStore`].
///
/// The connection sits behind `Arc<Mutex<_>>` so the input thread, the idle
/// checker and the status task can share one store.
#[derive(Clone)]
pub struct Activities {
    conn: Arc<Mutex<Connection>>,
}

impl Activities {
    /// Opens the store in the user's data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    /// Opens the store at an explicit database path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_db(Db::open(path)?))
    }

    fn from_db(db: Db) -> Self {
        Self {
            conn: Arc::new(Mutex::new(db.conn)),
        }
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<ActivityInterval>> {
        let conn_guard = self.conn.lock();
        let mut stmt = conn_guard.prepare(sql)?;
        let rows = stmt.query_map(params, |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, Option<i64>>(2)?, row.get::<_, String>(3)?))
        })?;

        let mut intervals = Vec::new();
        for row in rows {
            let (id, start, end, kind) = row?;
            if let Some(interval) = to_interval(id, start, end, &kind) {
                intervals.push(interval);
            }
        }
        Ok(intervals)
    }
}

/// Builds an interval from raw column values, skipping rows that cannot be
/// interpreted.
fn to_interval(id: i64, start: i64, end: Option<i64>, kind: &str) -> Option<ActivityInterval> {
    let Ok(kind) = kind.parse::<ActivityKind>() else {
        msg_debug!(Message::UnknownActivityKind(kind.to_string()));
        return None;
    };
    let Some(start) = from_unix(start) else {
        msg_debug!(Message::InvalidActivityTimestamp(start));
        return None;
    };
    let end = match end.filter(|&secs| secs > 0) {
        Some(secs) => Some(from_unix(secs)?),
        None => None,
    };

    Some(ActivityInterval {
        id: Some(id),
        start,
        end,
        kind,
    })
}

impl ActivityStore for Activities {
    fn save(&self, interval: &ActivityInterval) -> Result<i64> {
        let conn_guard = self.conn.lock();
        conn_guard.execute(
            INSERT_ACTIVITY,
            params![
                interval.start.timestamp(),
                interval.end.map(|end| end.timestamp()),
                interval.kind.as_str()
            ],
        )?;
        Ok(conn_guard.last_insert_rowid())
    }

    fn close(&self, id: i64, end: DateTime<Local>) -> Result<()> {
        let conn_guard = self.conn.lock();
        let updated = conn_guard.execute(UPDATE_END_TIME, params![end.timestamp(), id])?;
        if updated == 0 {
            msg_bail_anyhow!(Message::ActivityNotFound(id));
        }
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<ActivityInterval>> {
        self.query(SELECT_ALL, [])
    }

    fn list_range(&self, start: DateTime<Local>, end: DateTime<Local>) -> Result<Vec<ActivityInterval>> {
        self.query(SELECT_RANGE, params![start.timestamp(), end.timestamp()])
    }

    fn delete_open(&self) -> Result<usize> {
        let conn_guard = self.conn.lock();
        Ok(conn_guard.execute(DELETE_OPEN, [])?)
    }
}
