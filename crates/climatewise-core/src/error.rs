//! App-level error type.
//!
//! Repository calls surface [`climatewise_api::ApiFailure`]; this type
//! exists for the outer shell (config load, local storage wiring) and
//! for screens that need one error to hold either kind.

use climatewise_api::ApiFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("API failure: {0}")]
    Api(#[from] ApiFailure),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// User-friendly message suitable for UI display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => e.user_message(),
            AppError::Config(_) => "Invalid configuration. Check your settings.".to_string(),
            AppError::Storage(_) => {
                "Unable to access local data. Try restarting the app.".to_string()
            }
            AppError::Io(_) => "A file operation failed. Please try again.".to_string(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_failures_keep_their_user_message() {
        let err = AppError::from(ApiFailure::Api {
            status: 500,
            message: "boom".to_string(),
        });
        assert!(err.user_message().contains("try again later"));
    }

    #[test]
    fn storage_errors_suggest_restart() {
        let err = AppError::Storage("disk full".to_string());
        assert!(err.user_message().contains("restarting"));
    }
}
