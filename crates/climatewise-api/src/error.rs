//! The error taxonomy every repository surfaces.
//!
//! Exactly three remote failure shapes reach callers (network,
//! validation, generic API), plus a format guard for 2xx responses
//! that are not JSON objects. Raw transport errors never escape.

use std::collections::BTreeMap;

use thiserror::Error;

/// Per-field validation messages, as sent by the backend's `errors` map.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ApiFailure {
    /// Transport/connectivity failure: the server was never reached or
    /// the connection broke mid-flight.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP 422 or an explicit `errors` map in the envelope.
    #[error("Validation failed ({} field(s))", field_errors.len())]
    Validation { field_errors: FieldErrors },

    /// Any other non-success envelope or HTTP status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body is not a parseable JSON object.
    #[error("Unexpected response format: {0}")]
    UnexpectedFormat(String),
}

impl ApiFailure {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Unable to connect. Check your internet connection.".to_string(),
            Self::Validation { field_errors } => field_errors
                .values()
                .flatten()
                .next()
                .cloned()
                .unwrap_or_else(|| "Please correct the highlighted fields.".to_string()),
            Self::Api { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later.".to_string()
            }
            Self::Api { .. } => "The request failed. Please try again.".to_string(),
            Self::UnexpectedFormat(_) => {
                "Received an unexpected response. Please try again.".to_string()
            }
        }
    }

    /// Per-field messages when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { field_errors } => Some(field_errors),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_user_message_prefers_first_field_message() {
        let mut fields = FieldErrors::new();
        fields.insert("name".to_string(), vec!["required".to_string()]);
        let err = ApiFailure::Validation {
            field_errors: fields,
        };
        assert_eq!(err.user_message(), "required");
        assert!(err.is_validation());
    }

    #[test]
    fn server_errors_get_a_softer_message() {
        let err = ApiFailure::Api {
            status: 503,
            message: "upstream down".to_string(),
        };
        assert!(err.user_message().contains("try again later"));
        assert!(err.field_errors().is_none());
    }
}
