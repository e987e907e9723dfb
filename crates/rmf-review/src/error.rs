use rmf_srs::SrsError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by [`crate::ReviewService`]
#[derive(Error, Debug)]
pub enum ReviewError {
    /// The review could not be scheduled
    #[error("Scheduling error: {0}")]
    Srs(#[from] SrsError),
    /// The card store or log sink failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    /// Rejected input, such as a blank title
    #[error("Validation error: {0}")]
    Validation(String),
}
