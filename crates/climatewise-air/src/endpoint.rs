//! Endpoint-name to path resolution.
//!
//! Pure: no I/O, nothing cached. Resolution fails when a required
//! parameter is missing or empty; out-of-range zoom and forecast
//! values are clamped, matching the server's tolerance.

use climatewise_api::QueryBuilder;

use crate::error::AirError;
use crate::types::{clamp_zoom, BoundingBox, SortOrder, TimeSelector};

#[derive(Debug)]
pub enum AirEndpoint<'a> {
    AppStatus,
    OverlayTimes {
        product: &'a str,
        order: SortOrder,
    },
    Legend {
        product: &'a str,
    },
    Overlays {
        product: &'a str,
        zoom: u8,
        bbox: BoundingBox,
        time: &'a TimeSelector,
    },
    Forecast {
        product: &'a str,
        zoom: u8,
        bbox: BoundingBox,
        hours: u8,
    },
    OverlayGrids {
        product: &'a str,
        zoom: u8,
        bbox: BoundingBox,
        gid: &'a str,
    },
    ForecastGrids {
        product: &'a str,
        zoom: u8,
        bbox: BoundingBox,
        hours: u8,
    },
    PointAssess {
        product: &'a str,
        lat: f64,
        lon: f64,
        time: &'a TimeSelector,
    },
    Stations {
        bbox: BoundingBox,
        parameter: Option<&'a str>,
    },
    StationsNear {
        lat: f64,
        lon: f64,
        radius_km: f64,
    },
}

impl AirEndpoint<'_> {
    pub fn path(&self) -> Result<String, AirError> {
        match self {
            Self::AppStatus => Ok("air/app-status".to_string()),
            Self::OverlayTimes { product, order } => {
                let product = require_product(product)?;
                Ok(QueryBuilder::new("air/overlay-times")
                    .param("product", product)
                    .param("order", order.as_str())
                    .build())
            }
            Self::Legend { product } => {
                let product = require_product(product)?;
                Ok(QueryBuilder::new("air/legend")
                    .param("product", product)
                    .build())
            }
            Self::Overlays {
                product,
                zoom,
                bbox,
                time,
            } => {
                let product = require_product(product)?;
                let query = QueryBuilder::new("air/overlays")
                    .param("product", product)
                    .param("z", clamp_zoom(*zoom))
                    .param("bbox", bbox.to_query_value());
                Ok(time.append(query)?.build())
            }
            Self::Forecast {
                product,
                zoom,
                bbox,
                hours,
            } => {
                let product = require_product(product)?;
                Ok(QueryBuilder::new("air/forecast")
                    .param("product", product)
                    .param("z", clamp_zoom(*zoom))
                    .param("bbox", bbox.to_query_value())
                    .forecast_hours(*hours)
                    .build())
            }
            Self::OverlayGrids {
                product,
                zoom,
                bbox,
                gid,
            } => {
                let product = require_product(product)?;
                if gid.trim().is_empty() {
                    return Err(AirError::InvalidRequest("gid must not be empty".into()));
                }
                Ok(QueryBuilder::new("air/overlay-grids")
                    .param("product", product)
                    .param("z", clamp_zoom(*zoom))
                    .param("bbox", bbox.to_query_value())
                    .param("gid", gid)
                    .build())
            }
            Self::ForecastGrids {
                product,
                zoom,
                bbox,
                hours,
            } => {
                let product = require_product(product)?;
                Ok(QueryBuilder::new("air/forecast-grids")
                    .param("product", product)
                    .param("z", clamp_zoom(*zoom))
                    .param("bbox", bbox.to_query_value())
                    .forecast_hours(*hours)
                    .build())
            }
            Self::PointAssess {
                product,
                lat,
                lon,
                time,
            } => {
                let product = require_product(product)?;
                let query = QueryBuilder::new("air/point-assess")
                    .param("product", product)
                    .param("lat", lat)
                    .param("lon", lon);
                Ok(time.append(query)?.build())
            }
            Self::Stations { bbox, parameter } => Ok(QueryBuilder::new("air/stations")
                .param("bbox", bbox.to_query_value())
                .opt_param("parameter", *parameter)
                .build()),
            Self::StationsNear {
                lat,
                lon,
                radius_km,
            } => Ok(QueryBuilder::new("air/stations/near")
                .param("lat", lat)
                .param("lon", lon)
                .param("radius", radius_km)
                .build()),
        }
    }
}

fn require_product(product: &str) -> Result<&str, AirError> {
    let trimmed = product.trim();
    if trimmed.is_empty() {
        return Err(AirError::InvalidRequest("product must not be empty".into()));
    }
    Ok(trimmed)
}
