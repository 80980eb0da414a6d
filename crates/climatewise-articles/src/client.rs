use tracing::instrument;

use climatewise_api::{ApiFailure, ApiTransport, Envelope, Paginated, QueryBuilder};

use crate::types::Article;

pub struct ArticlesClient {
    transport: ApiTransport,
}

impl ArticlesClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// Lists articles newest first. `query` filters server-side when
    /// present; an empty or whitespace query is treated as absent.
    #[instrument(skip(self), level = "info")]
    pub async fn list(
        &self,
        page: u32,
        per_page: u32,
        query: Option<&str>,
    ) -> Result<Paginated<Article>, ApiFailure> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let path = QueryBuilder::new("articles")
            .param("page", page)
            .param("per_page", per_page)
            .opt_param("q", query)
            .build();
        let body = self.transport.get(&path).await?;
        let env = Envelope::parse(body)?.check()?;
        let items = env.items("data").iter().map(Article::from_value).collect();
        Ok(Paginated {
            items,
            meta: env.meta(),
        })
    }

    /// One article with its full body.
    #[instrument(skip(self), level = "info")]
    pub async fn get(&self, id: &str) -> Result<Article, ApiFailure> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ApiFailure::UnexpectedFormat(
                "article id must not be empty".to_string(),
            ));
        }
        let body = self.transport.get(&format!("articles/{id}")).await?;
        let env = Envelope::parse(body)?.check()?;
        let data = env
            .field("data")
            .ok_or_else(|| ApiFailure::UnexpectedFormat("article payload missing".to_string()))?;
        Ok(Article::from_value(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climatewise_api::TransportOptions;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> ArticlesClient {
        let transport = ApiTransport::new(&server.uri(), &TransportOptions::default()).unwrap();
        ArticlesClient::new(transport)
    }

    #[tokio::test]
    async fn list_decodes_items_and_meta() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "10"))
            .and(query_param_is_missing("q"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "succeed": true,
                "data": [
                    {"id": 1, "title": "A", "summary": "first"},
                    {"id": 2, "title": "B", "summary": "second"}
                ],
                "meta": {"page": 1, "per_page": 10, "total": 25, "last_page": 3}
            })))
            .mount(&server)
            .await;

        let result = client(&server).await.list(1, 10, None).await.unwrap();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].title, "A");
        assert!(result.has_more());
    }

    #[tokio::test]
    async fn final_page_has_no_more() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "succeed": true,
                "data": [{"id": 25, "title": "Z", "summary": "last"}],
                "meta": {"page": 3, "per_page": 10, "total": 25, "last_page": 3}
            })))
            .mount(&server)
            .await;

        let result = client(&server).await.list(3, 10, None).await.unwrap();
        assert!(!result.has_more());
    }

    #[tokio::test]
    async fn search_query_is_url_encoded() {
        let server = MockServer::start().await;
        // wiremock matches against the decoded value
        Mock::given(method("GET"))
            .and(path("/articles"))
            .and(query_param("q", "heat waves"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "succeed": true,
                "data": [],
                "meta": {"page": 1, "per_page": 10, "total": 0}
            })))
            .mount(&server)
            .await;

        let result = client(&server)
            .await
            .list(1, 10, Some("heat waves"))
            .await
            .unwrap();
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn blank_query_is_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles"))
            .and(query_param_is_missing("q"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "succeed": true,
                "data": [],
                "meta": {"page": 1, "per_page": 10, "total": 0}
            })))
            .mount(&server)
            .await;

        client(&server).await.list(1, 10, Some("   ")).await.unwrap();
    }

    #[tokio::test]
    async fn get_returns_the_full_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "succeed": true,
                "data": {
                    "id": 7,
                    "title": "Heat and the city",
                    "summary": "short",
                    "body": "Long form text",
                    "published_at": "2024-06-01T09:30:00Z"
                }
            })))
            .mount(&server)
            .await;

        let article = client(&server).await.get("7").await.unwrap();
        assert_eq!(article.body.as_deref(), Some("Long form text"));
    }

    #[tokio::test]
    async fn missing_article_surfaces_the_envelope_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles/404"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "succeed": false,
                "status": 404,
                "message": "not found"
            })))
            .mount(&server)
            .await;

        let err = client(&server).await.get("404").await.unwrap_err();
        match err {
            ApiFailure::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }
}
