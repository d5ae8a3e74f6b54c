//! Errors surfaced by the activity tracker.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// The store rejected a write or could not be queried.
    #[error("activity store failure: {0:#}")]
    Persistence(anyhow::Error),
}

pub type TrackerResult<T> = std::result::Result<T, TrackerError>;
