//! Greenhouse-gas API client.

use parking_lot::Mutex;
use tracing::instrument;

use climatewise_api::{ApiTransport, Envelope, QueryBuilder};

use crate::types::*;

pub struct GasClient {
    transport: ApiTransport,
    /// Most recently fetched country list, kept only for synchronous
    /// re-reads by the map screen. Overwritten on every successful
    /// fresh fetch; never a source of truth.
    countries: Mutex<Vec<GasData>>,
}

impl GasClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self {
            transport,
            countries: Mutex::new(Vec::new()),
        }
    }

    async fn fetch(&self, path: &str) -> Result<Envelope, GasError> {
        let body = self.transport.get(path).await.map_err(GasError::Api)?;
        Ok(Envelope::parse(body)?.check()?)
    }

    /// Per-country emissions for a year; refreshes the read cache.
    #[instrument(skip(self), level = "info")]
    pub async fn countries(&self, year: i32) -> Result<Vec<GasData>, GasError> {
        let path = QueryBuilder::new("gas/countries")
            .param("year", year)
            .build();
        let env = self.fetch(&path).await?;
        let list: Vec<GasData> = env.items("data").iter().map(GasData::from_value).collect();
        *self.countries.lock() = list.clone();
        Ok(list)
    }

    /// Synchronous read of the last fetched country list.
    pub fn cached_countries(&self) -> Vec<GasData> {
        self.countries.lock().clone()
    }

    /// Palette score for a country from the read cache; unknown or
    /// not-yet-fetched ISO codes fall back to 1 (bottom of palette).
    pub fn score_for(&self, iso_a3: &str) -> u8 {
        let wanted = iso_a3.trim().to_ascii_uppercase();
        self.countries
            .lock()
            .iter()
            .find(|c| c.iso_a3 == wanted)
            .map(|c| c.score)
            .unwrap_or(1)
    }

    /// Country detail for one year.
    #[instrument(skip(self), level = "info")]
    pub async fn country(&self, iso_a3: &str, year: i32) -> Result<CountryGasData, GasError> {
        let iso = normalize_iso(iso_a3)?;
        let env = self.fetch(&format!("gas/country/{iso}/{year}")).await?;
        let value = env
            .field("country")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        Ok(CountryGasData::from_value(&value))
    }

    /// Yearly emission history for a country.
    #[instrument(skip(self), level = "info")]
    pub async fn country_years(&self, iso_a3: &str) -> Result<Vec<GasYearRecord>, GasError> {
        let iso = normalize_iso(iso_a3)?;
        let env = self.fetch(&format!("gas/country/{iso}/years")).await?;
        Ok(env.items("years").iter().map(GasYearRecord::from_value).collect())
    }

    /// Years the backend has data for.
    #[instrument(skip(self), level = "info")]
    pub async fn years(&self) -> Result<Vec<i32>, GasError> {
        let env = self.fetch("gas/years").await?;
        Ok(env
            .items("years")
            .iter()
            .map(|v| climatewise_api::coerce::lenient_i64(v) as i32)
            .collect())
    }

    /// Global totals and top emitters for a year.
    #[instrument(skip(self), level = "info")]
    pub async fn statistics(&self, year: i32) -> Result<GasStatistics, GasError> {
        let path = QueryBuilder::new("gas/statistics")
            .param("year", year)
            .build();
        let env = self.fetch(&path).await?;
        Ok(GasStatistics {
            year: env
                .field("year")
                .map(climatewise_api::coerce::lenient_i64)
                .unwrap_or(year as i64) as i32,
            global_total_mt: env
                .field("global_total_mt")
                .map(climatewise_api::coerce::lenient_f64)
                .unwrap_or(0.0),
            top_countries: env
                .items("top_countries")
                .iter()
                .map(GasData::from_value)
                .collect(),
        })
    }
}
