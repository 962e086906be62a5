//! Error types shared by the store and the shift tracker.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Rejections and failures of a shift action
#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("no active shift")]
    NoActiveShift,

    #[error("shift already active since {since}")]
    ShiftAlreadyActive { since: DateTime<Utc> },

    #[error("clock-out at {end} is earlier than clock-in at {start}")]
    ClockSkew {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("failed to persist shifts: {0}")]
    Persistence(#[from] StoreError),
}
