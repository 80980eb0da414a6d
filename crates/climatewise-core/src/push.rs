//! Inbound push-notification payload normalization.
//!
//! Delivery (FCM/APNs) happens outside this codebase; what arrives here
//! is the message's JSON payload, in one of a few layouts depending on
//! platform and app state. Normalization produces a single
//! `{title, body, data, source}` shape for deferred in-app display.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PushSource {
    HealthAlert,
    Article,
    System,
    #[default]
    Unknown,
}

impl PushSource {
    fn from_key(key: &str) -> Self {
        match key {
            "health_alert" | "alert" => Self::HealthAlert,
            "article" | "news" => Self::Article,
            "system" => Self::System,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    /// The raw `data` object, kept for deep-link handling.
    pub data: Value,
    pub source: PushSource,
}

impl PushMessage {
    /// Normalizes a raw payload. Title/body may live at the top level,
    /// under `notification`, or inside `data`; first hit wins.
    pub fn from_payload(payload: &Value) -> Self {
        let data = payload
            .get("data")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_else(Map::new);

        let title = text_field(payload, &data, "title");
        let body = text_field(payload, &data, "body");
        let source = data
            .get("source")
            .and_then(Value::as_str)
            .map(PushSource::from_key)
            .unwrap_or_default();

        Self {
            title,
            body,
            data: Value::Object(data),
            source,
        }
    }
}

fn text_field(payload: &Value, data: &Map<String, Value>, key: &str) -> String {
    payload
        .get(key)
        .or_else(|| payload.get("notification").and_then(|n| n.get(key)))
        .or_else(|| data.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
