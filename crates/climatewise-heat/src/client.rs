//! Heat-anomaly API client.

use parking_lot::Mutex;
use tracing::instrument;

use climatewise_api::coerce;
use climatewise_api::{ApiTransport, Envelope, QueryBuilder};

use crate::types::*;

pub struct HeatClient {
    transport: ApiTransport,
    /// Read cache of the last fetched country list (last-writer-wins,
    /// refreshed on every successful fetch).
    countries: Mutex<Vec<HeatData>>,
}

impl HeatClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self {
            transport,
            countries: Mutex::new(Vec::new()),
        }
    }

    async fn fetch(&self, path: &str) -> Result<Envelope, HeatError> {
        let body = self.transport.get(path).await.map_err(HeatError::Api)?;
        Ok(Envelope::parse(body)?.check()?)
    }

    /// Per-country anomalies for a year; refreshes the read cache.
    #[instrument(skip(self), level = "info")]
    pub async fn countries(&self, year: i32) -> Result<Vec<HeatData>, HeatError> {
        let path = QueryBuilder::new("heat/countries")
            .param("year", year)
            .build();
        let env = self.fetch(&path).await?;
        let list: Vec<HeatData> = env.items("data").iter().map(HeatData::from_value).collect();
        *self.countries.lock() = list.clone();
        Ok(list)
    }

    /// Synchronous read of the last fetched country list.
    pub fn cached_countries(&self) -> Vec<HeatData> {
        self.countries.lock().clone()
    }

    /// Palette score from the read cache; unknown ISO codes yield 1.
    pub fn score_for(&self, iso_a3: &str) -> u8 {
        let wanted = iso_a3.trim().to_ascii_uppercase();
        self.countries
            .lock()
            .iter()
            .find(|c| c.iso_a3 == wanted)
            .map(|c| c.score)
            .unwrap_or(1)
    }

    /// Country heat detail for one year.
    #[instrument(skip(self), level = "info")]
    pub async fn country(&self, iso_a3: &str, year: i32) -> Result<CountryHeatData, HeatError> {
        let iso = normalize_iso(iso_a3)?;
        let env = self.fetch(&format!("heat/country/{iso}/{year}")).await?;
        let value = env
            .field("country")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        Ok(CountryHeatData::from_value(&value))
    }

    /// Yearly anomaly history for a country.
    #[instrument(skip(self), level = "info")]
    pub async fn country_years(&self, iso_a3: &str) -> Result<Vec<HeatYearRecord>, HeatError> {
        let iso = normalize_iso(iso_a3)?;
        let env = self.fetch(&format!("heat/country/{iso}/years")).await?;
        Ok(env.items("years").iter().map(HeatYearRecord::from_value).collect())
    }

    /// Years the backend has data for.
    #[instrument(skip(self), level = "info")]
    pub async fn years(&self) -> Result<Vec<i32>, HeatError> {
        let env = self.fetch("heat/years").await?;
        Ok(env
            .items("years")
            .iter()
            .map(|v| coerce::lenient_i64(v) as i32)
            .collect())
    }

    /// Global anomaly and the warmest countries for a year.
    #[instrument(skip(self), level = "info")]
    pub async fn statistics(&self, year: i32) -> Result<HeatStatistics, HeatError> {
        let path = QueryBuilder::new("heat/statistics")
            .param("year", year)
            .build();
        let env = self.fetch(&path).await?;
        Ok(HeatStatistics {
            year: env
                .field("year")
                .map(coerce::lenient_i64)
                .unwrap_or(year as i64) as i32,
            global_anomaly_c: env
                .field("global_anomaly_c")
                .map(coerce::lenient_f64)
                .unwrap_or(0.0),
            top_countries: env
                .items("top_countries")
                .iter()
                .map(HeatData::from_value)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climatewise_api::TransportOptions;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> HeatClient {
        let transport = ApiTransport::new(&server.uri(), &TransportOptions::default()).unwrap();
        HeatClient::new(transport)
    }

    #[tokio::test]
    async fn countries_refresh_the_cache_on_each_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/heat/countries"))
            .and(query_param("year", "2022"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "succeed": true,
                "data": [{"iso_a3": "ESP", "anomaly_c": "1.8", "score": 8}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/heat/countries"))
            .and(query_param("year", "2023"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "succeed": true,
                "data": [{"iso_a3": "ESP", "anomaly_c": 2.4, "score": 9}]
            })))
            .mount(&server)
            .await;

        let client = client(&server).await;
        client.countries(2022).await.unwrap();
        assert_eq!(client.score_for("ESP"), 8);
        // fresh fetch invalidates the previous cache contents
        client.countries(2023).await.unwrap();
        assert_eq!(client.score_for("ESP"), 9);
        assert_eq!(client.score_for("NOR"), 1);
    }

    #[tokio::test]
    async fn country_years_decode_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/heat/country/ESP/years"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "succeed": true,
                "years": [
                    {"year": 2021, "anomaly_c": 1.1},
                    {"year": "2022", "anomaly_c": "1.8"}
                ]
            })))
            .mount(&server)
            .await;

        let history = client(&server).await.country_years("esp").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].year, 2022);
        assert_eq!(history[1].anomaly_c, 1.8);
    }

    #[tokio::test]
    async fn statistics_surface_warmest_countries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/heat/statistics"))
            .and(query_param("year", "2023"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "succeed": true,
                "year": 2023,
                "global_anomaly_c": 1.45,
                "top_countries": [{"iso_a3": "IRQ", "anomaly_c": 2.9, "score": 10}]
            })))
            .mount(&server)
            .await;

        let stats = client(&server).await.statistics(2023).await.unwrap();
        assert_eq!(stats.global_anomaly_c, 1.45);
        assert_eq!(stats.top_countries[0].iso_a3, "IRQ");
    }
}
