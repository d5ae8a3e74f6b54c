//! Activity intervals: the unit of tracked work.
//!
//! An [`ActivityInterval`] spans from the first input after an idle gap to the
//! last input before the next one. While the session is still running the
//! interval is *open* (`end == None`).

use chrono::{DateTime, Duration, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source of the input that started a session.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Pointer movement, clicks and wheel scrolling.
    Mouse,
    /// Key presses and releases.
    Keyboard,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Mouse => "mouse",
            ActivityKind::Keyboard => "keyboard",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mouse" => Ok(ActivityKind::Mouse),
            "keyboard" => Ok(ActivityKind::Keyboard),
            other => Err(anyhow::anyhow!("unknown activity kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityInterval {
    /// Row id, assigned by the store on insert.
    pub id: Option<i64>,
    pub start: DateTime<Local>,
    /// `None` while the session is ongoing.
    pub end: Option<DateTime<Local>>,
    pub kind: ActivityKind,
}

impl ActivityInterval {
    /// Creates an open interval starting at `start`.
    pub fn open(start: DateTime<Local>, kind: ActivityKind) -> Self {
        Self {
            id: None,
            start: truncate_to_second(start),
            end: None,
            kind,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Duration of a closed interval; `None` while open.
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end.signed_duration_since(self.start))
    }

    /// Closes the interval. An end before the start is clamped to the start.
    pub fn close(&mut self, end: DateTime<Local>) {
        let end = truncate_to_second(end);
        self.end = Some(end.max(self.start));
    }
}

/// Drops sub-second precision so in-memory instants match what the store
/// keeps (whole Unix seconds).
pub fn truncate_to_second(instant: DateTime<Local>) -> DateTime<Local> {
    from_unix(instant.timestamp()).unwrap_or(instant)
}

/// Converts Unix seconds to a local instant.
pub fn from_unix(secs: i64) -> Option<DateTime<Local>> {
    Local.timestamp_opt(secs, 0).single()
}
