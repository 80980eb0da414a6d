//! The uniform response envelope and its classification rule.
//!
//! Every backend endpoint wraps its payload in
//! `{succeed: bool, status?, message?, errors?, meta?, ...domain fields}`.
//! Repositories parse the transport's JSON into an [`Envelope`] and call
//! [`Envelope::check`]; the resulting failure shapes are always one of
//! [`ApiFailure::Validation`] or [`ApiFailure::Api`].

use serde_json::{Map, Value};

use crate::coerce;
use crate::error::{ApiFailure, FieldErrors};

#[derive(Debug, Clone)]
pub struct Envelope {
    fields: Map<String, Value>,
}

impl Envelope {
    /// Wraps a parsed JSON body. Non-object bodies are a format error;
    /// the transport already guarantees objects on the 2xx path, so
    /// this only trips on misuse.
    pub fn parse(body: Value) -> Result<Self, ApiFailure> {
        match body {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ApiFailure::UnexpectedFormat(format!(
                "expected envelope object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn succeed(&self) -> bool {
        self.fields
            .get("succeed")
            .map(coerce::lenient_bool)
            .unwrap_or(false)
    }

    pub fn status(&self) -> Option<u16> {
        self.fields
            .get("status")
            .map(|v| coerce::lenient_i64(v).clamp(0, u16::MAX as i64) as u16)
    }

    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").and_then(Value::as_str)
    }

    /// Applies the uniform decision rule: `succeed == true` passes the
    /// envelope through; anything else classifies into validation or
    /// generic API failure. An absent `succeed` flag is treated as
    /// not-succeeded (the contract guarantees the flag, so a missing
    /// one is a malformed envelope).
    pub fn check(self) -> Result<Self, ApiFailure> {
        if self.succeed() {
            return Ok(self);
        }
        let status = self.status().unwrap_or(0);
        Err(classify_failure(status, &self.fields))
    }

    /// A named domain payload field (`data`, `country`, `top_countries`, ...).
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// A payload field expected to be an array; absent or non-array
    /// fields decode as empty (best-effort render).
    pub fn items(&self, key: &str) -> &[Value] {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn meta(&self) -> Meta {
        Meta::from_value(self.fields.get("meta"))
    }
}

/// Classifies a failed envelope (or a non-2xx JSON body) into the
/// taxonomy. 422 or a non-empty `errors` map means validation.
pub(crate) fn classify_failure(status: u16, fields: &Map<String, Value>) -> ApiFailure {
    let field_errors = parse_field_errors(fields.get("errors"));
    let envelope_status = fields
        .get("status")
        .map(|v| coerce::lenient_i64(v).clamp(0, u16::MAX as i64) as u16)
        .filter(|s| *s != 0)
        .unwrap_or(status);

    if status == 422 || envelope_status == 422 || !field_errors.is_empty() {
        return ApiFailure::Validation { field_errors };
    }

    let message = fields
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("request failed")
        .to_string();
    ApiFailure::Api {
        status: envelope_status,
        message,
    }
}

fn parse_field_errors(errors: Option<&Value>) -> FieldErrors {
    let mut out = FieldErrors::new();
    let Some(Value::Object(map)) = errors else {
        return out;
    };
    for (field, messages) in map {
        let list = match messages {
            Value::Array(items) => items.iter().map(coerce::lenient_string).collect(),
            Value::String(s) => vec![s.clone()],
            other => vec![coerce::lenient_string(other)],
        };
        out.insert(field.clone(), list);
    }
    out
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Pagination block from the envelope's `meta` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
    pub sort: Option<String>,
}

impl Meta {
    pub fn from_value(value: Option<&Value>) -> Self {
        let empty = Map::new();
        let map = value.and_then(Value::as_object).unwrap_or(&empty);
        let page = map.get("page").map(coerce::lenient_i64).unwrap_or(1).max(1) as u32;
        let per_page = map
            .get("per_page")
            .map(coerce::lenient_i64)
            .unwrap_or(0)
            .max(0) as u32;
        let total = map.get("total").map(coerce::lenient_i64).unwrap_or(0).max(0) as u64;
        let last_page = map
            .get("last_page")
            .map(coerce::lenient_i64)
            .filter(|v| *v > 0)
            .map(|v| v as u32)
            .unwrap_or_else(|| computed_last_page(total, per_page));
        let sort = map.get("sort").and_then(Value::as_str).map(str::to_string);
        Self {
            page,
            per_page,
            total,
            last_page,
            sort,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.last_page
    }
}

fn computed_last_page(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 1;
    }
    (total.div_ceil(per_page as u64)).max(1) as u32
}

/// One page of decoded items plus the pagination block it came with.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: Meta,
}

impl<T> Paginated<T> {
    pub fn has_more(&self) -> bool {
        self.meta.has_more()
    }
}
