//! Single-shot HTTP transport.
//!
//! One wrapper issues GET/POST/PUT/DELETE with JSON headers and feeds
//! every response through a canonical `{status, body}` normalization
//! step before classification. No retries, no backoff; the configured
//! timeout is the only deadline.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::envelope::classify_failure;
use crate::error::ApiFailure;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much raw body to keep in error messages.
const SNIPPET_LEN: usize = 200;

#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub timeout_secs: u64,
    /// Accept any TLS certificate. Explicit opt-in for self-signed
    /// backend hosts; a deliberate trust downgrade, never a default.
    pub allow_invalid_certs: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            allow_invalid_certs: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiTransport {
    client: Client,
    base_url: String,
}

impl ApiTransport {
    pub fn new(base_url: &str, options: &TransportOptions) -> Result<Self, ApiFailure> {
        let mut builder = Client::builder().timeout(Duration::from_secs(options.timeout_secs));
        if options.allow_invalid_certs {
            tracing::warn!("TLS certificate verification disabled for {base_url}");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiFailure> {
        self.execute(self.client.get(self.url(path))).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiFailure> {
        self.execute(self.client.post(self.url(path)).json(body))
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiFailure> {
        self.execute(self.client.put(self.url(path)).json(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiFailure> {
        self.execute(self.client.delete(self.url(path))).await
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, ApiFailure> {
        let response = request.header(ACCEPT, "application/json").send().await?;
        let raw = RawResponse::read(response).await?;
        raw.into_json()
    }
}

/// Canonical response shape: everything downstream sees only
/// `{status, body}` regardless of how the HTTP stack delivered it.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: Option<Value>,
    text: String,
}

impl RawResponse {
    async fn read(response: reqwest::Response) -> Result<Self, ApiFailure> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str::<Value>(&text).ok();
        Ok(Self { status, body, text })
    }

    /// Classifies by HTTP status:
    /// - 2xx + JSON object: the body.
    /// - 2xx otherwise: `UnexpectedFormat`.
    /// - non-2xx + JSON object: envelope classification (422 ->
    ///   validation, else API failure with the envelope message).
    /// - non-2xx otherwise: API failure carrying the raw text.
    fn into_json(self) -> Result<Value, ApiFailure> {
        let success = (200..300).contains(&self.status);
        match (success, self.body) {
            (true, Some(value @ Value::Object(_))) => Ok(value),
            (true, _) => Err(ApiFailure::UnexpectedFormat(format!(
                "status {}: {}",
                self.status,
                snippet(&self.text)
            ))),
            (false, Some(Value::Object(fields))) => Err(classify_failure(self.status, &fields)),
            (false, _) => Err(ApiFailure::Api {
                status: self.status,
                message: snippet(&self.text),
            }),
        }
    }
}

fn snippet(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    trimmed.chars().take(SNIPPET_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn transport(server: &MockServer) -> ApiTransport {
        ApiTransport::new(&server.uri(), &TransportOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn get_returns_parsed_json_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/air/app-status"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "succeed": true, "operational": true
            })))
            .mount(&server)
            .await;

        let body = transport(&server).await.get("air/app-status").await.unwrap();
        assert_eq!(body["operational"], serde_json::json!(true));
    }

    #[tokio::test]
    async fn non_json_200_is_unexpected_format() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = transport(&server).await.get("broken").await.unwrap_err();
        assert!(matches!(err, ApiFailure::UnexpectedFormat(_)));
    }

    #[tokio::test]
    async fn empty_200_is_unexpected_format() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = transport(&server).await.get("empty").await.unwrap_err();
        assert!(matches!(err, ApiFailure::UnexpectedFormat(_)));
    }

    #[tokio::test]
    async fn http_422_with_errors_map_is_validation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/health-advisor/store"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "succeed": false,
                "status": 422,
                "errors": {"name": ["required"]}
            })))
            .mount(&server)
            .await;

        let err = transport(&server)
            .await
            .post("health-advisor/store", &serde_json::json!({}))
            .await
            .unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["name"], vec!["required".to_string()]);
    }

    #[tokio::test]
    async fn non_2xx_without_json_carries_raw_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        match transport(&server).await.get("missing").await.unwrap_err() {
            ApiFailure::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_2xx_with_envelope_uses_its_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teapot"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "succeed": false, "message": "backend exploded"
            })))
            .mount(&server)
            .await;

        match transport(&server).await.get("teapot").await.unwrap_err() {
            ApiFailure::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "backend exploded");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_network() {
        // port 1 is never listening
        let t = ApiTransport::new("http://127.0.0.1:1", &TransportOptions::default()).unwrap();
        let err = t.get("anything").await.unwrap_err();
        assert!(matches!(err, ApiFailure::Network(_)));
    }

    #[tokio::test]
    async fn json_array_200_is_unexpected_format() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2])))
            .mount(&server)
            .await;

        let err = transport(&server).await.get("list").await.unwrap_err();
        assert!(matches!(err, ApiFailure::UnexpectedFormat(_)));
    }
}
