use serde_json::Value;
use thiserror::Error;

use climatewise_api::{coerce, ApiFailure};

/// Heat-repository errors.
#[derive(Debug, Error)]
pub enum HeatError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Api(#[from] ApiFailure),
}

impl HeatError {
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => format!("Invalid request: {msg}"),
            Self::Api(e) => e.user_message(),
        }
    }
}

impl From<HeatError> for ApiFailure {
    fn from(err: HeatError) -> Self {
        match err {
            HeatError::Api(failure) => failure,
            HeatError::InvalidRequest(message) => ApiFailure::Api { status: 0, message },
        }
    }
}

pub(crate) fn normalize_iso(iso: &str) -> Result<String, HeatError> {
    let trimmed = iso.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(HeatError::InvalidRequest(format!(
            "invalid ISO alpha-3 code: {trimmed:?}"
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Per-country heat summary used to color map polygons. `anomaly_c` is
/// the temperature delta against the country's reference baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatData {
    pub iso_a3: String,
    pub anomaly_c: f64,
    /// 1..=10 palette index; always clamped on decode.
    pub score: u8,
}

impl HeatData {
    pub fn from_value(value: &Value) -> Self {
        Self {
            iso_a3: value
                .get("iso_a3")
                .map(coerce::lenient_string)
                .unwrap_or_default()
                .to_ascii_uppercase(),
            anomaly_c: value
                .get("anomaly_c")
                .map(coerce::lenient_f64)
                .unwrap_or(0.0),
            score: value.get("score").map(coerce::lenient_score).unwrap_or(1),
        }
    }
}

/// Country heat detail for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryHeatData {
    pub iso_a3: String,
    pub name: String,
    pub year: i32,
    pub anomaly_c: f64,
    pub baseline_c: f64,
    pub max_temp_c: f64,
    pub score: u8,
}

impl CountryHeatData {
    pub fn from_value(value: &Value) -> Self {
        Self {
            iso_a3: value
                .get("iso_a3")
                .map(coerce::lenient_string)
                .unwrap_or_default()
                .to_ascii_uppercase(),
            name: value.get("name").map(coerce::lenient_string).unwrap_or_default(),
            year: value.get("year").map(coerce::lenient_i64).unwrap_or(0) as i32,
            anomaly_c: value
                .get("anomaly_c")
                .map(coerce::lenient_f64)
                .unwrap_or(0.0),
            baseline_c: value
                .get("baseline_c")
                .map(coerce::lenient_f64)
                .unwrap_or(0.0),
            max_temp_c: value
                .get("max_temp_c")
                .map(coerce::lenient_f64)
                .unwrap_or(0.0),
            score: value.get("score").map(coerce::lenient_score).unwrap_or(1),
        }
    }
}

/// One year in a country's anomaly history.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatYearRecord {
    pub year: i32,
    pub anomaly_c: f64,
}

impl HeatYearRecord {
    pub fn from_value(value: &Value) -> Self {
        Self {
            year: value.get("year").map(coerce::lenient_i64).unwrap_or(0) as i32,
            anomaly_c: value
                .get("anomaly_c")
                .map(coerce::lenient_f64)
                .unwrap_or(0.0),
        }
    }
}

/// Global heat statistics for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatStatistics {
    pub year: i32,
    pub global_anomaly_c: f64,
    pub top_countries: Vec<HeatData>,
}
