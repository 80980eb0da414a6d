use chrono::{DateTime, Utc};
use serde_json::Value;

use climatewise_api::coerce;

/// One editorial article. List responses carry the summary fields only;
/// `body` is populated by the detail endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id").map(coerce::lenient_string).unwrap_or_default(),
            title: value
                .get("title")
                .map(coerce::lenient_string)
                .unwrap_or_default(),
            summary: value
                .get("summary")
                .map(coerce::lenient_string)
                .unwrap_or_default(),
            body: value
                .get("body")
                .and_then(Value::as_str)
                .map(str::to_string),
            image_url: value
                .get("image_url")
                .and_then(Value::as_str)
                .map(str::to_string),
            published_at: value
                .get("published_at")
                .and_then(Value::as_str)
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|t| t.with_timezone(&Utc)),
        }
    }
}
