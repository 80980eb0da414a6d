//! Air-repository errors.

use climatewise_api::ApiFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirError {
    /// A required request parameter was missing or empty before any
    /// network call was made.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Api(#[from] ApiFailure),
}

impl AirError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => format!("Invalid request: {msg}"),
            Self::Api(e) => e.user_message(),
        }
    }
}

impl From<AirError> for ApiFailure {
    fn from(err: AirError) -> Self {
        match err {
            AirError::Api(failure) => failure,
            AirError::InvalidRequest(message) => ApiFailure::Api { status: 0, message },
        }
    }
}
