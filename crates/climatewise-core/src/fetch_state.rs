//! Per-screen fetch state.
//!
//! Each screen owns one [`FetchSlot`] per remote operation. `begin`
//! hands out a generation token; a completion carrying a stale token is
//! dropped, so an async fetch that resolves after the screen moved on
//! can never clobber newer state. This is a safety guard, not a
//! cancellation protocol: the request itself still runs to completion.

use std::collections::BTreeMap;

use climatewise_api::ApiFailure;

/// Observable state a view renders from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed {
        message: String,
        field_errors: BTreeMap<String, Vec<String>>,
    },
}

/// State holder with a generation counter guarding stale completions.
#[derive(Debug, Default)]
pub struct FetchSlot<T> {
    state: FetchState<T>,
    generation: u64,
}

impl<T> FetchSlot<T> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            generation: 0,
        }
    }

    /// Marks the slot loading and returns the token the eventual
    /// completion must present.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = FetchState::Loading;
        self.generation
    }

    /// Applies a completed fetch. Returns false (and changes nothing)
    /// when the token is stale, i.e. a newer `begin` has happened.
    pub fn resolve(&mut self, token: u64, result: Result<T, ApiFailure>) -> bool {
        if token != self.generation {
            tracing::debug!("dropping stale fetch completion (token {token})");
            return false;
        }
        self.state = match result {
            Ok(value) => FetchState::Loaded(value),
            Err(failure) => FetchState::Failed {
                message: failure.user_message(),
                field_errors: failure.field_errors().cloned().unwrap_or_default(),
            },
        };
        true
    }

    /// Back to idle; outstanding completions become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = FetchState::Idle;
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            FetchState::Loaded(v) => Some(v),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Per-field messages for inline form rendering.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match &self.state {
            FetchState::Failed { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_then_resolve_loads_the_value() {
        let mut slot = FetchSlot::new();
        let token = slot.begin();
        assert!(slot.is_loading());
        assert!(slot.resolve(token, Ok(42)));
        assert_eq!(slot.value(), Some(&42));
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut slot = FetchSlot::new();
        let old = slot.begin();
        let fresh = slot.begin();
        // the older in-flight fetch loses
        assert!(!slot.resolve(old, Ok(1)));
        assert!(slot.is_loading());
        assert!(slot.resolve(fresh, Ok(2)));
        assert_eq!(slot.value(), Some(&2));
    }

    #[test]
    fn reset_invalidates_outstanding_tokens() {
        let mut slot = FetchSlot::new();
        let token = slot.begin();
        slot.reset();
        assert!(!slot.resolve(token, Ok(7)));
        assert_eq!(slot.state(), &FetchState::Idle);
    }

    #[test]
    fn validation_failures_expose_field_errors() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), vec!["required".to_string()]);
        let mut slot: FetchSlot<()> = FetchSlot::new();
        let token = slot.begin();
        slot.resolve(
            token,
            Err(ApiFailure::Validation {
                field_errors: fields,
            }),
        );
        assert_eq!(slot.error_message(), Some("required"));
        assert_eq!(
            slot.field_errors().and_then(|f| f.get("name")),
            Some(&vec!["required".to_string()])
        );
    }

    #[test]
    fn generic_failures_have_a_message_but_no_fields() {
        let mut slot: FetchSlot<()> = FetchSlot::new();
        let token = slot.begin();
        slot.resolve(
            token,
            Err(ApiFailure::Api {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        assert!(slot.error_message().is_some());
        assert!(slot.field_errors().is_none());
    }
}
