//! # WorkPulse - input activity tracker
//!
//! Watches mouse and keyboard input, groups it into activity sessions that end
//! after a configurable idle threshold, stores them in SQLite, and reports
//! active time per day.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use workpulse::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
