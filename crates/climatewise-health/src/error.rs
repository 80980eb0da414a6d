//! Health-repository errors.

use climatewise_api::ApiFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Api(#[from] ApiFailure),
}

impl HealthError {
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => format!("Invalid request: {msg}"),
            Self::Api(e) => e.user_message(),
        }
    }

    /// Per-field validation messages, when the backend rejected the form.
    pub fn field_errors(&self) -> Option<&climatewise_api::error::FieldErrors> {
        match self {
            Self::Api(failure) => failure.field_errors(),
            Self::InvalidRequest(_) => None,
        }
    }
}

impl From<HealthError> for ApiFailure {
    fn from(err: HealthError) -> Self {
        match err {
            HealthError::Api(failure) => failure,
            HealthError::InvalidRequest(message) => ApiFailure::Api { status: 0, message },
        }
    }
}
