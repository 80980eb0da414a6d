use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use climatewise_api::coerce;

/// User-selected health-risk sensitivity profile. Drives the fixed
/// per-pollutant base scores used by the risk calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Sensitive,
    #[default]
    Normal,
    Relaxed,
}

impl Sensitivity {
    /// Base pollutant score on a 0..=10 scale, identical across NO2,
    /// HCHO and O3 in this version.
    pub fn base_score(self) -> f64 {
        match self {
            Self::Sensitive => 2.0,
            Self::Normal => 6.0,
            Self::Relaxed => 8.5,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "sensitive" => Some(Self::Sensitive),
            "normal" => Some(Self::Normal),
            "relaxed" => Some(Self::Relaxed),
            _ => None,
        }
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn serialize_round4<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round4(*value))
}

/// Form location. Coordinates are rounded to 4 decimals (about 11 m)
/// on serialization; the backend needs no more precision and the
/// round-trip stays stable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(serialize_with = "serialize_round4")]
    pub lat: f64,
    #[serde(serialize_with = "serialize_round4")]
    pub lon: f64,
}

/// Alert preferences attached to a submission. `hours2h` holds the
/// start hours (0..=22, step 2) of the two-hour windows the user wants
/// alerts in; kept sorted and deduplicated on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AlertPrefs {
    pub pollution: bool,
    pub sound: bool,
    #[serde(default)]
    pub hours2h: Vec<u8>,
}

/// The health-advisor form: built from UI input, scored client-side,
/// then submitted. The echo returned by the backend becomes the
/// client's `last_submitted_form`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub name: String,
    pub location: GeoPoint,
    pub sensitivity: Sensitivity,
    #[serde(default)]
    pub diseases: Vec<String>,
    pub overall_score: f64,
    #[serde(default)]
    pub alerts: AlertPrefs,
}

impl HealthForm {
    /// Serializes with normalized alert hours (sorted, deduplicated)
    /// and rounded coordinates.
    pub fn to_json(&self) -> Value {
        let mut normalized = self.clone();
        normalized.alerts.hours2h.sort_unstable();
        normalized.alerts.hours2h.dedup();
        serde_json::to_value(normalized).unwrap_or(Value::Null)
    }

    pub fn from_json(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }
}

/// Server-persisted record of a prior submission.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthResultSummary {
    pub id: String,
    pub name: String,
    pub overall_score: f64,
    pub sensitivity: Sensitivity,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl HealthResultSummary {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id").map(coerce::lenient_string).unwrap_or_default(),
            name: value.get("name").map(coerce::lenient_string).unwrap_or_default(),
            overall_score: value
                .get("overall_score")
                .map(coerce::lenient_f64)
                .unwrap_or(0.0),
            sensitivity: value
                .get("sensitivity")
                .and_then(Value::as_str)
                .and_then(Sensitivity::from_key)
                .unwrap_or_default(),
            submitted_at: value
                .get("submitted_at")
                .and_then(Value::as_str)
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|t| t.with_timezone(&Utc)),
        }
    }
}
