use serde_json::Value;
use thiserror::Error;

use climatewise_api::{coerce, ApiFailure};

/// Gas-repository errors.
#[derive(Debug, Error)]
pub enum GasError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Api(#[from] ApiFailure),
}

impl GasError {
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => format!("Invalid request: {msg}"),
            Self::Api(e) => e.user_message(),
        }
    }
}

impl From<GasError> for ApiFailure {
    fn from(err: GasError) -> Self {
        match err {
            GasError::Api(failure) => failure,
            GasError::InvalidRequest(message) => ApiFailure::Api { status: 0, message },
        }
    }
}

/// ISO 3166-1 alpha-3 code, trimmed and uppercased; anything that is
/// not three ASCII letters is an invalid request.
pub(crate) fn normalize_iso(iso: &str) -> Result<String, GasError> {
    let trimmed = iso.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GasError::InvalidRequest(format!(
            "invalid ISO alpha-3 code: {trimmed:?}"
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Per-country emission summary used to color map polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct GasData {
    pub iso_a3: String,
    pub co2_mt: f64,
    pub ch4_mt: f64,
    pub total_mt: f64,
    /// 1..=10 palette index; always clamped on decode.
    pub score: u8,
}

impl GasData {
    pub fn from_value(value: &Value) -> Self {
        Self {
            iso_a3: value
                .get("iso_a3")
                .map(coerce::lenient_string)
                .unwrap_or_default()
                .to_ascii_uppercase(),
            co2_mt: value.get("co2_mt").map(coerce::lenient_f64).unwrap_or(0.0),
            ch4_mt: value.get("ch4_mt").map(coerce::lenient_f64).unwrap_or(0.0),
            total_mt: value.get("total_mt").map(coerce::lenient_f64).unwrap_or(0.0),
            score: value.get("score").map(coerce::lenient_score).unwrap_or(1),
        }
    }
}

/// Country detail for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryGasData {
    pub iso_a3: String,
    pub name: String,
    pub year: i32,
    pub co2_mt: f64,
    pub ch4_mt: f64,
    pub n2o_mt: f64,
    pub per_capita_t: f64,
    pub score: u8,
}

impl CountryGasData {
    pub fn from_value(value: &Value) -> Self {
        Self {
            iso_a3: value
                .get("iso_a3")
                .map(coerce::lenient_string)
                .unwrap_or_default()
                .to_ascii_uppercase(),
            name: value.get("name").map(coerce::lenient_string).unwrap_or_default(),
            year: value.get("year").map(coerce::lenient_i64).unwrap_or(0) as i32,
            co2_mt: value.get("co2_mt").map(coerce::lenient_f64).unwrap_or(0.0),
            ch4_mt: value.get("ch4_mt").map(coerce::lenient_f64).unwrap_or(0.0),
            n2o_mt: value.get("n2o_mt").map(coerce::lenient_f64).unwrap_or(0.0),
            per_capita_t: value
                .get("per_capita_t")
                .map(coerce::lenient_f64)
                .unwrap_or(0.0),
            score: value.get("score").map(coerce::lenient_score).unwrap_or(1),
        }
    }
}

/// One year in a country's emission history.
#[derive(Debug, Clone, PartialEq)]
pub struct GasYearRecord {
    pub year: i32,
    pub total_mt: f64,
    pub per_capita_t: f64,
}

impl GasYearRecord {
    pub fn from_value(value: &Value) -> Self {
        Self {
            year: value.get("year").map(coerce::lenient_i64).unwrap_or(0) as i32,
            total_mt: value.get("total_mt").map(coerce::lenient_f64).unwrap_or(0.0),
            per_capita_t: value
                .get("per_capita_t")
                .map(coerce::lenient_f64)
                .unwrap_or(0.0),
        }
    }
}

/// Global statistics for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct GasStatistics {
    pub year: i32,
    pub global_total_mt: f64,
    pub top_countries: Vec<GasData>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn iso_codes_normalize_to_uppercase() {
        assert_eq!(normalize_iso(" usa ").unwrap(), "USA");
        assert_eq!(normalize_iso("DEU").unwrap(), "DEU");
    }

    #[test]
    fn bad_iso_codes_are_invalid_requests() {
        assert!(matches!(normalize_iso(""), Err(GasError::InvalidRequest(_))));
        assert!(matches!(normalize_iso("US"), Err(GasError::InvalidRequest(_))));
        assert!(matches!(normalize_iso("U5A"), Err(GasError::InvalidRequest(_))));
    }

    #[test]
    fn gas_data_clamps_score_and_coerces_strings() {
        let data = GasData::from_value(&json!({
            "iso_a3": "chn", "co2_mt": "11000.5", "ch4_mt": 55, "total_mt": null, "score": 0
        }));
        assert_eq!(data.iso_a3, "CHN");
        assert_eq!(data.co2_mt, 11000.5);
        assert_eq!(data.total_mt, 0.0);
        assert_eq!(data.score, 1);
    }

    #[test]
    fn year_records_tolerate_string_years() {
        let record = GasYearRecord::from_value(&json!({"year": "2019", "total_mt": "36000"}));
        assert_eq!(record.year, 2019);
        assert_eq!(record.total_mt, 36000.0);
    }
}
