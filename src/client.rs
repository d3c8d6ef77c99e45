//! HTTP client for the combined QA and YouTube search backend.
//!
//! Issues one `GET {base_url}/search` per query and validates the response
//! shape before handing back a typed bundle.

use crate::config::BackendConfig;
use crate::results::SearchResultBundle;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("edusearch/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search request timed out")]
    Timeout,
    #[error("search backend returned HTTP {status}")]
    Http { status: StatusCode },
    #[error("failed to parse search response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unexpected search response structure: {message}")]
    Schema { message: String, payload: String },
    #[error("failed to reach search backend: {0}")]
    Connection(reqwest::Error),
    #[error("invalid search client setup: {0}")]
    Client(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Timeout
        } else if let Some(status) = e.status() {
            SearchError::Http { status }
        } else {
            SearchError::Connection(e)
        }
    }
}

/// Client for the search backend's `/search` endpoint.
pub struct SearchClient {
    client: Client,
    endpoint: Url,
}

impl SearchClient {
    /// Create a client for the backend described by `config`
    pub fn new(config: &BackendConfig) -> Result<Self, SearchError> {
        let base = config.base_url.trim().trim_end_matches('/');
        let endpoint = Url::parse(&format!("{}/search", base))
            .map_err(|e| SearchError::Client(format!("bad base URL {:?}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::Client(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    #[cfg(test)]
    pub(crate) fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run a search, returning the top `k` QA and video results
    pub async fn search(&self, query: &str, k: usize) -> Result<SearchResultBundle, SearchError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("k", &k.to_string());

        tracing::debug!(%url, "sending search request");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "search backend returned an error status");
            return Err(SearchError::Http { status });
        }

        let body = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&body)?;
        let bundle = parse_bundle(payload)?;

        tracing::debug!(
            qa = bundle.qa_results.len(),
            yt = bundle.yt_results.len(),
            "search returned"
        );
        Ok(bundle)
    }
}

/// Validate a decoded payload and convert it into a bundle.
///
/// Both `qa_results` and `yt_results` must be present as arrays; anything
/// else rejects the whole response.
pub fn parse_bundle(payload: Value) -> Result<SearchResultBundle, SearchError> {
    let shape_ok = payload
        .as_object()
        .map(|obj| {
            obj.get("qa_results").is_some_and(Value::is_array)
                && obj.get("yt_results").is_some_and(Value::is_array)
        })
        .unwrap_or(false);

    if !shape_ok {
        return Err(schema_error(
            "expected `qa_results` and `yt_results` as lists",
            &payload,
        ));
    }

    let pretty = pretty_payload(&payload);
    serde_json::from_value(payload).map_err(|e| SearchError::Schema {
        message: format!("malformed result record: {}", e),
        payload: pretty,
    })
}

fn schema_error(message: &str, payload: &Value) -> SearchError {
    SearchError::Schema {
        message: message.to_string(),
        payload: pretty_payload(payload),
    }
}

fn pretty_payload(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn backend(url: &str) -> BackendConfig {
        BackendConfig {
            base_url: url.to_string(),
            ..BackendConfig::default()
        }
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = SearchClient::new(&backend("http://search.local/")).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://search.local/search");
    }

    #[test]
    fn test_bad_base_url() {
        let err = SearchClient::new(&backend("not a url")).err().unwrap();
        assert!(matches!(err, SearchError::Client(_)));
    }

    #[test]
    fn test_parse_bundle_requires_both_lists() {
        let missing_yt = json!({ "qa_results": [] });
        assert!(matches!(parse_bundle(missing_yt), Err(SearchError::Schema { .. })));

        let missing_qa = json!({ "yt_results": [] });
        assert!(matches!(parse_bundle(missing_qa), Err(SearchError::Schema { .. })));

        let not_list = json!({ "qa_results": {}, "yt_results": [] });
        assert!(matches!(parse_bundle(not_list), Err(SearchError::Schema { .. })));

        let not_object = json!([1, 2, 3]);
        assert!(matches!(parse_bundle(not_object), Err(SearchError::Schema { .. })));
    }

    #[test]
    fn test_parse_bundle_keeps_payload_for_diagnostics() {
        let err = parse_bundle(json!({ "results": ["x"] })).unwrap_err();
        match err {
            SearchError::Schema { payload, .. } => assert!(payload.contains("\"results\"")),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bundle_rejects_malformed_records() {
        let err = parse_bundle(json!({ "qa_results": [42], "yt_results": [] })).unwrap_err();
        assert!(matches!(err, SearchError::Schema { .. }));
    }

    #[test]
    fn test_parse_bundle_rejects_mistyped_fields() {
        let numeric_level = json!({
            "qa_results": [{ "rank": 0, "qa_id": 1, "Level": 3 }],
            "yt_results": []
        });
        assert!(matches!(parse_bundle(numeric_level), Err(SearchError::Schema { .. })));

        let null_rank = json!({ "qa_results": [], "yt_results": [{ "rank": null }] });
        assert!(matches!(parse_bundle(null_rank), Err(SearchError::Schema { .. })));
    }

    #[test]
    fn test_parse_bundle_accepts_empty_lists() {
        let bundle = parse_bundle(json!({ "qa_results": [], "yt_results": [] })).unwrap();
        assert!(bundle.is_empty());
    }

    #[tokio::test]
    async fn test_search_sends_query_and_k() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "how to bake cake?".into()),
                Matcher::UrlEncoded("k".into(), "3".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "qa_results": [{
                        "rank": 0,
                        "qa_id": 1,
                        "Question": "How do I bake a cake?",
                        "Answer": "Mix and bake at 350F..."
                    }],
                    "yt_results": [{ "rank": 0, "video_id": "abc123", "title": "Cake Tutorial" }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = SearchClient::new(&backend(&server.url())).unwrap();
        let bundle = client.search("how to bake cake?", 3).await.unwrap();

        mock.assert_async().await;
        assert_eq!(bundle.qa_results.len(), 1);
        assert_eq!(bundle.qa_results[0].question_text(), "How do I bake a cake?");
        assert_eq!(bundle.yt_results[0].video_id.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_search_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = SearchClient::new(&backend(&server.url())).unwrap();
        let err = client.search("anything", 3).await.unwrap_err();
        assert!(matches!(err, SearchError::Http { status } if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_search_non_json_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>tunnel offline</html>")
            .create_async()
            .await;

        let client = SearchClient::new(&backend(&server.url())).unwrap();
        let err = client.search("anything", 3).await.unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_search_missing_list_is_total_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({ "qa_results": [{ "rank": 0, "qa_id": 1 }] }).to_string())
            .create_async()
            .await;

        let client = SearchClient::new(&backend(&server.url())).unwrap();
        let err = client.search("anything", 3).await.unwrap_err();
        assert!(matches!(err, SearchError::Schema { .. }));
    }

    #[tokio::test]
    async fn test_search_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept the connection but never answer
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let config = BackendConfig {
            base_url: format!("http://{}", addr),
            timeout_secs: 1,
            ..BackendConfig::default()
        };
        let client = SearchClient::new(&config).unwrap();
        let err = client.search("slow", 3).await.unwrap_err();
        assert!(matches!(err, SearchError::Timeout));
    }

    #[tokio::test]
    async fn test_search_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SearchClient::new(&backend(&format!("http://{}", addr))).unwrap();
        let err = client.search("offline", 3).await.unwrap_err();
        assert!(matches!(err, SearchError::Connection(_)));
    }
}
