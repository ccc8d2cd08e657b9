use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input rejected before any store or network call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    #[error("radius must be greater than zero, got {0} km")]
    InvalidRadius(f64),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("{field} is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Failures reported by the record store.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store rejected the record: {0}")]
    Rejected(String),
}

/// Failures of the one-shot location lookup.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location lookup timed out")]
    Timeout,

    #[error("location is not supported on this device")]
    Unsupported,
}

/// Errors surfaced by the discovery operations. None of them is fatal:
/// retrying the triggering user action is always allowed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiscoveryError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("search failed: {0}")]
    SearchFailed(#[source] StoreError),

    #[error("{0}")]
    StoreUnavailable(#[source] StoreError),

    #[error("location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),

    #[error("you must be logged in to do this")]
    AuthRequired,

    #[error("{0} is already in progress")]
    InProgress(&'static str),

    #[error("actor mailbox error: {0}")]
    Mailbox(String),
}

impl From<actix::MailboxError> for DiscoveryError {
    fn from(err: actix::MailboxError) -> Self {
        DiscoveryError::Mailbox(err.to_string())
    }
}
