use chrono::Duration;
use thiserror::Error;

/// Errors reported by the scheduler. None of them is retryable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SrsError {
    /// An explicit grade outside 0-5
    #[error("Invalid quality: {0} (must be between 0 and 5)")]
    InvalidQuality(i32),
    /// Quality inference requested for a zero or negative duration
    #[error("Invalid attempt duration: {0} (must be positive)")]
    InvalidDuration(Duration),
    /// A stored state that breaks the scheduling invariants
    #[error("Corrupt scheduling state: {0}")]
    CorruptState(String),
    /// The next review date does not fit in a timestamp
    #[error("Next review date is out of range")]
    ScheduleOverflow,
}
