//! Core library modules for workpulse.
//!
//! ## Features
//!
//! - **Tracking**: activity intervals, the idle/active state machine
//! - **Monitoring**: OS input listener, idle checker, signal-aware daemon
//! - **Reporting**: daily aggregation, hourly timeline, console tables
//! - **Infrastructure**: settings, data directory, user-facing messages
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workpulse::db::activities::Activities;
//! use workpulse::libs::tracker::Tracker;
//!
//! let tracker = Tracker::new(Arc::new(Activities::new()?), 15);
//! tracker.load_activities()?;
//! println!("{} day(s) recorded", tracker.daily_aggregates().len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod activity;
pub mod config;
pub mod daemon;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod messages;
pub mod monitor;
pub mod stats;
pub mod timeline;
pub mod tracker;
pub mod view;
