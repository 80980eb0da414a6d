//! Air-quality API client.

use parking_lot::Mutex;
use tracing::instrument;

use climatewise_api::{ApiTransport, Envelope};

use crate::cache::LegendCache;
use crate::endpoint::AirEndpoint;
use crate::error::AirError;
use crate::types::*;

pub struct AirClient {
    transport: ApiTransport,
    legends: Mutex<LegendCache>,
}

impl AirClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self {
            transport,
            legends: Mutex::new(LegendCache::new()),
        }
    }

    async fn fetch(&self, endpoint: AirEndpoint<'_>) -> Result<Envelope, AirError> {
        let path = endpoint.path()?;
        let body = self.transport.get(&path).await?;
        Ok(Envelope::parse(body)?.check()?)
    }

    /// Backend health and enabled products.
    #[instrument(skip(self), level = "info")]
    pub async fn app_status(&self) -> Result<AppStatus, AirError> {
        let env = self.fetch(AirEndpoint::AppStatus).await?;
        let root = env
            .field("data")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        Ok(AppStatus::from_value(&root))
    }

    /// Available past overlay slots for a product, sorted by `t1` in
    /// the requested order regardless of server ordering.
    #[instrument(skip(self), level = "info")]
    pub async fn overlay_times(
        &self,
        product: &str,
        order: SortOrder,
    ) -> Result<Vec<OverlaySlot>, AirError> {
        let env = self
            .fetch(AirEndpoint::OverlayTimes { product, order })
            .await?;
        let mut slots: Vec<OverlaySlot> =
            env.items("data").iter().map(OverlaySlot::from_value).collect();
        slots.sort_by_key(|slot| slot.t1);
        if matches!(order, SortOrder::Desc) {
            slots.reverse();
        }
        Ok(slots)
    }

    /// Legend for a product. Served from the per-product cache unless
    /// `force_refresh` is set; the cache repopulates on every fresh
    /// fetch.
    #[instrument(skip(self), level = "info")]
    pub async fn legend(&self, product: &str, force_refresh: bool) -> Result<Legend, AirError> {
        if !force_refresh {
            if let Some(cached) = self.legends.lock().get(product) {
                tracing::debug!("legend cache hit for {product}");
                return Ok(cached.clone());
            }
        }
        let env = self.fetch(AirEndpoint::Legend { product }).await?;
        let value = env
            .field("data")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        let legend = Legend::from_value(product.trim(), &value);
        self.legends.lock().insert(legend.clone());
        Ok(legend)
    }

    /// Clears cached legends (one product, or all).
    pub fn invalidate_legends(&self, product: Option<&str>) {
        self.legends.lock().invalidate(product);
    }

    /// Overlay imagery for a past slot or forecast offset.
    #[instrument(skip(self, time), level = "info")]
    pub async fn overlays(
        &self,
        product: &str,
        zoom: u8,
        bbox: BoundingBox,
        time: &TimeSelector,
    ) -> Result<Vec<OverlayFrame>, AirError> {
        let env = self
            .fetch(AirEndpoint::Overlays {
                product,
                zoom,
                bbox,
                time,
            })
            .await?;
        Ok(env.items("data").iter().map(OverlayFrame::from_value).collect())
    }

    /// Forecast imagery `hours` ahead of now (clamped to 0..=12).
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(
        &self,
        product: &str,
        zoom: u8,
        bbox: BoundingBox,
        hours: i64,
    ) -> Result<Vec<OverlayFrame>, AirError> {
        let hours = match TimeSelector::forecast(hours) {
            TimeSelector::Forecast { hours } => hours,
            TimeSelector::Past { .. } => 0,
        };
        let env = self
            .fetch(AirEndpoint::Forecast {
                product,
                zoom,
                bbox,
                hours,
            })
            .await?;
        Ok(env.items("data").iter().map(OverlayFrame::from_value).collect())
    }

    /// Numeric grid behind a past overlay.
    #[instrument(skip(self), level = "info")]
    pub async fn overlay_grid(
        &self,
        product: &str,
        zoom: u8,
        bbox: BoundingBox,
        gid: &str,
    ) -> Result<OverlayGrid, AirError> {
        let env = self
            .fetch(AirEndpoint::OverlayGrids {
                product,
                zoom,
                bbox,
                gid,
            })
            .await?;
        let value = env
            .field("data")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        Ok(OverlayGrid::from_value(product.trim(), &value))
    }

    /// Numeric grid for a forecast offset.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast_grid(
        &self,
        product: &str,
        zoom: u8,
        bbox: BoundingBox,
        hours: i64,
    ) -> Result<OverlayGrid, AirError> {
        let hours = match TimeSelector::forecast(hours) {
            TimeSelector::Forecast { hours } => hours,
            TimeSelector::Past { .. } => 0,
        };
        let env = self
            .fetch(AirEndpoint::ForecastGrids {
                product,
                zoom,
                bbox,
                hours,
            })
            .await?;
        let value = env
            .field("data")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        Ok(OverlayGrid::from_value(product.trim(), &value))
    }

    /// Assessment of one product at a point and time.
    #[instrument(skip(self, time), level = "info")]
    pub async fn point_assess(
        &self,
        product: &str,
        lat: f64,
        lon: f64,
        time: &TimeSelector,
    ) -> Result<PointAssessment, AirError> {
        let env = self
            .fetch(AirEndpoint::PointAssess {
                product,
                lat,
                lon,
                time,
            })
            .await?;
        let value = env
            .field("data")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        Ok(PointAssessment::from_value(&value))
    }

    /// Stations within a bounding box, optionally filtered by parameter.
    #[instrument(skip(self), level = "info")]
    pub async fn stations(
        &self,
        bbox: BoundingBox,
        parameter: Option<&str>,
    ) -> Result<Vec<Station>, AirError> {
        let env = self.fetch(AirEndpoint::Stations { bbox, parameter }).await?;
        Ok(env.items("data").iter().map(Station::from_value).collect())
    }

    /// Stations within `radius_km` of a point.
    #[instrument(skip(self), level = "info")]
    pub async fn stations_near(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<Vec<Station>, AirError> {
        let env = self
            .fetch(AirEndpoint::StationsNear {
                lat,
                lon,
                radius_km,
            })
            .await?;
        Ok(env.items("data").iter().map(Station::from_value).collect())
    }
}
