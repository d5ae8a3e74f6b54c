//! Database layer for workpulse.
//!
//! A single SQLite file in the per-user data directory holds every activity
//! interval. The schema is versioned through [`migrations`], which run each
//! time a connection is opened.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use workpulse::db::activities::{Activities, ActivityStore};
//!
//! let activities = Activities::new()?;
//! let removed = activities.delete_open()?;
//! println!("removed {} unfinished interval(s)", removed);
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Activity interval storage and the store contract used by the tracker.
pub mod activities;

/// Connection setup.
pub mod db;

/// Versioned schema changes.
pub mod migrations;
