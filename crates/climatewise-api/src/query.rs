//! Query-string assembly with the backend's fixed wire conventions.
//!
//! Parameters keep insertion order and every key/value is URL-encoded.
//! Conventions the server expects:
//! - booleans as `'1'` / `'0'`
//! - forecast offsets as `t=+H` (H hours ahead of now)
//! - bounding boxes as `W,S,E,N`
//! - nested weight maps as `weights[key]=value`

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    path: String,
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            pairs: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends the parameter only when a value is present.
    pub fn opt_param(self, key: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Boolean flag, stringified as `'1'` / `'0'`.
    pub fn flag(self, key: &str, on: bool) -> Self {
        self.param(key, if on { "1" } else { "0" })
    }

    /// Forecast-hour offset, stringified as `+H`.
    pub fn forecast_hours(self, hours: u8) -> Self {
        self.param("t", format!("+{hours}"))
    }

    /// Nested weight map, stringified as `field[key]=value` pairs in
    /// the given iteration order.
    pub fn weights<'a, I>(mut self, field: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        for (key, value) in entries {
            self.pairs
                .push((format!("{field}[{key}]"), value.to_string()));
        }
        self
    }

    pub fn build(self) -> String {
        if self.pairs.is_empty() {
            return self.path;
        }
        let query = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}
