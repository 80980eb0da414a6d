use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use climatewise_api::coerce;
use climatewise_api::QueryBuilder;

use crate::error::AirError;

/// Highest forecast offset the backend serves.
pub const MAX_FORECAST_HOURS: u8 = 12;

/// Supported overlay zoom levels; out-of-range requests are clamped,
/// never rejected.
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 12;

pub(crate) fn clamp_zoom(zoom: u8) -> u8 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Requested ordering of overlay time slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Time selection for overlay/assessment queries: either a past slot
/// identified by `gid`, or a forecast offset in hours ahead of now.
/// The two are mutually exclusive on the wire (`gid=` vs `t=+H`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSelector {
    Past { gid: String },
    Forecast { hours: u8 },
}

impl TimeSelector {
    pub fn past(gid: impl Into<String>) -> Self {
        Self::Past { gid: gid.into() }
    }

    /// Forecast offset, silently clamped into `0..=12`.
    pub fn forecast(hours: i64) -> Self {
        Self::Forecast {
            hours: hours.clamp(0, MAX_FORECAST_HOURS as i64) as u8,
        }
    }

    /// "Now" expressed as a zero-hour forecast (`t=+0`).
    pub fn forecast_now() -> Self {
        Self::Forecast { hours: 0 }
    }

    pub(crate) fn append(&self, query: QueryBuilder) -> Result<QueryBuilder, AirError> {
        match self {
            Self::Past { gid } => {
                if gid.trim().is_empty() {
                    return Err(AirError::InvalidRequest("gid must not be empty".into()));
                }
                Ok(query.param("gid", gid))
            }
            Self::Forecast { hours } => Ok(query.forecast_hours(*hours)),
        }
    }
}

/// Geographic bounding box, serialized as `W,S,E,N`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    pub fn to_query_value(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

/// Lenient timestamp: epoch seconds (number or numeric string) or an
/// RFC 3339 string; anything else lands on the epoch.
pub(crate) fn parse_timestamp(value: &Value) -> DateTime<Utc> {
    if let Value::String(s) = value {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(s.trim()) {
            return parsed.with_timezone(&Utc);
        }
    }
    let secs = coerce::lenient_i64(value);
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Backend health/feature report shown at app start.
#[derive(Debug, Clone)]
pub struct AppStatus {
    pub operational: bool,
    pub message: Option<String>,
    pub products: Vec<String>,
}

impl AppStatus {
    pub fn from_value(value: &Value) -> Self {
        Self {
            operational: value
                .get("operational")
                .map(coerce::lenient_bool)
                .unwrap_or(true),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            products: value
                .get("products")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(coerce::lenient_string).collect())
                .unwrap_or_default(),
        }
    }
}

/// A timestamped map-layer slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySlot {
    pub gid: String,
    pub t1: DateTime<Utc>,
}

impl OverlaySlot {
    pub fn from_value(value: &Value) -> Self {
        Self {
            gid: value.get("gid").map(coerce::lenient_string).unwrap_or_default(),
            t1: value.get("t1").map(parse_timestamp).unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}

/// One stop in a legend's palette.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendStop {
    pub value: f64,
    pub color: String,
    pub label: Option<String>,
}

/// Palette/breakpoints for a pollutant product.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub product: String,
    pub units: String,
    pub stops: Vec<LegendStop>,
}

impl Legend {
    pub fn from_value(product: &str, value: &Value) -> Self {
        let stops = value
            .get("stops")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|stop| LegendStop {
                        value: stop.get("value").map(coerce::lenient_f64).unwrap_or(0.0),
                        color: stop.get("color").map(coerce::lenient_string).unwrap_or_default(),
                        label: stop.get("label").and_then(Value::as_str).map(str::to_string),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            product: product.to_string(),
            units: value.get("units").map(coerce::lenient_string).unwrap_or_default(),
            stops,
        }
    }
}

/// One rendered overlay image tile.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub url: String,
    pub t1: DateTime<Utc>,
    pub gid: Option<String>,
}

impl OverlayFrame {
    pub fn from_value(value: &Value) -> Self {
        Self {
            url: value.get("url").map(coerce::lenient_string).unwrap_or_default(),
            t1: value.get("t1").map(parse_timestamp).unwrap_or(DateTime::UNIX_EPOCH),
            gid: value.get("gid").and_then(Value::as_str).map(str::to_string),
        }
    }
}

/// One grid sample. The server sends either `[lat, lon, value]` triples
/// or full objects; both decode.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub lat: f64,
    pub lon: f64,
    pub value: f64,
}

impl GridCell {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self {
                lat: items.first().map(coerce::lenient_f64).unwrap_or(0.0),
                lon: items.get(1).map(coerce::lenient_f64).unwrap_or(0.0),
                value: items.get(2).map(coerce::lenient_f64).unwrap_or(0.0),
            },
            _ => Self {
                lat: value.get("lat").map(coerce::lenient_f64).unwrap_or(0.0),
                lon: value.get("lon").map(coerce::lenient_f64).unwrap_or(0.0),
                value: value.get("value").map(coerce::lenient_f64).unwrap_or(0.0),
            },
        }
    }
}

/// A bounded-region grid of values for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayGrid {
    pub product: String,
    pub cells: Vec<GridCell>,
}

impl OverlayGrid {
    pub fn from_value(product: &str, value: &Value) -> Self {
        let cells = value
            .get("cells")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(GridCell::from_value).collect())
            .unwrap_or_default();
        Self {
            product: product.to_string(),
            cells,
        }
    }
}

/// Point assessment for one product at one location and time.
#[derive(Debug, Clone, PartialEq)]
pub struct PointAssessment {
    pub product: String,
    pub value: f64,
    /// 1..=10 severity used for coloring; clamped on decode.
    pub score: u8,
    pub category: Option<String>,
}

impl PointAssessment {
    pub fn from_value(value: &Value) -> Self {
        Self {
            product: value.get("product").map(coerce::lenient_string).unwrap_or_default(),
            value: value.get("value").map(coerce::lenient_f64).unwrap_or(0.0),
            score: value.get("score").map(coerce::lenient_score).unwrap_or(1),
            category: value.get("category").and_then(Value::as_str).map(str::to_string),
        }
    }
}

/// A ground monitoring station measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub parameter: String,
    pub value: f64,
    pub unit: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl Station {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id").map(coerce::lenient_string).unwrap_or_default(),
            name: value.get("name").and_then(Value::as_str).map(str::to_string),
            lat: value.get("lat").map(coerce::lenient_f64).unwrap_or(0.0),
            lon: value.get("lon").map(coerce::lenient_f64).unwrap_or(0.0),
            parameter: value
                .get("parameter")
                .map(coerce::lenient_string)
                .unwrap_or_default(),
            value: value.get("value").map(coerce::lenient_f64).unwrap_or(0.0),
            unit: value.get("unit").and_then(Value::as_str).map(str::to_string),
            observed_at: value.get("observed_at").map(parse_timestamp).filter(|t| {
                // epoch sentinel means the field was missing/garbage
                *t != DateTime::UNIX_EPOCH
            }),
        }
    }
}
