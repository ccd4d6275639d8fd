use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::clients::normalize::{self, ResponseShape};
use crate::constants::intervals;
use crate::models::{Record, SearchDomain, SearchQuery};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Search API returned {status}")]
    Status { status: u16 },

    #[error("Search API timed out after {0:?}")]
    Timeout(Duration),

    #[error("Search API unreachable: {0}")]
    Transport(String),

    #[error("Search API returned invalid JSON: {0}")]
    MalformedBody(String),

    #[error("Search API returned an unrecognised response shape")]
    MalformedResponseShape,
}

impl FetchError {
    fn from_reqwest(e: &reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            Self::Timeout(timeout)
        } else if e.is_decode() {
            Self::MalformedBody(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Source of fresh search results.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<Record>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
}

/// Client for the aggregated grocery/restaurant search backend.
///
/// Each `fetch` is a single request bounded by the configured timeout.
/// Failures are returned immediately and never retried; the caller falls
/// back to other sources instead.
#[derive(Clone)]
pub struct SearchApiClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
    status_timeout: Duration,
}

impl SearchApiClient {
    #[must_use]
    pub const fn new(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            timeout: intervals::FETCH_TIMEOUT,
            status_timeout: intervals::STATUS_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeouts(mut self, timeout: Duration, status_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.status_timeout = status_timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/{domain}/search?q=..[&city=..]`
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url, url::ParseError> {
        let mut url = self.endpoint(&format!("api/{}/search", query.domain()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query.text());
            if query.domain() == SearchDomain::Restaurant
                && let Some(city) = query.city()
            {
                pairs.append_pair("city", city);
            }
        }
        Ok(url)
    }

    /// Probes `{base}/status`. Any failure reads as "down".
    pub async fn check_status(&self) -> bool {
        let Ok(url) = self.endpoint("status") else {
            return false;
        };

        let response = match self
            .client
            .get(url)
            .timeout(self.status_timeout)
            .send()
            .await
        {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                debug!(status = %r.status(), "Search API status probe failed");
                return false;
            }
            Err(e) => {
                debug!(error = %e, "Search API status probe failed");
                return false;
            }
        };

        response
            .json::<StatusResponse>()
            .await
            .is_ok_and(|s| s.status == "API is running")
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}"))
    }
}

#[async_trait]
impl SearchProvider for SearchApiClient {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<Record>, FetchError> {
        let url = self
            .search_url(query)
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        debug!(url = %url, "Fetching search results");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(&e, self.timeout))?;

        let body: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::MalformedBody(e.to_string()))?;

        let items = ResponseShape::classify(body)
            .ok_or(FetchError::MalformedResponseShape)?
            .into_items();

        Ok(normalize::records(query.domain(), query.text(), &items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> SearchApiClient {
        SearchApiClient::new(Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn test_grocery_search_url() {
        let api = client("http://localhost:5000/");
        let q = SearchQuery::grocery("whole milk").unwrap();

        assert_eq!(
            api.search_url(&q).unwrap().as_str(),
            "http://localhost:5000/api/grocery/search?q=whole+milk"
        );
    }

    #[test]
    fn test_restaurant_search_url_carries_city() {
        let api = client("http://localhost:5000/backend");
        let q = SearchQuery::restaurant("biryani", Some("Hyderabad")).unwrap();

        assert_eq!(
            api.search_url(&q).unwrap().as_str(),
            "http://localhost:5000/backend/api/restaurant/search?q=biryani&city=Hyderabad"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let api = client("http://127.0.0.1:9").with_timeouts(
            Duration::from_millis(500),
            Duration::from_millis(500),
        );
        let q = SearchQuery::grocery("milk").unwrap();

        let err = api.fetch(&q).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Transport(_) | FetchError::Timeout(_)
        ));
        assert!(!api.check_status().await);
    }

    async fn fake_backend(
        axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
    ) -> axum::response::Response {
        use axum::http::{StatusCode, header};
        use axum::response::IntoResponse;

        let json = |body: &'static str| {
            ([(header::CONTENT_TYPE, "application/json")], body).into_response()
        };

        match params.get("q").map(String::as_str) {
            Some("bare") => json(r#"[{"name": "Amul Milk", "price": "₹68"}, {"name": "Toned Milk"}]"#),
            Some("results") => json(r#"{"results": [{"name": "Brown Bread"}]}"#),
            Some("products") => json(r#"{"products": [{"title": "Basmati Rice", "source": "Zepto"}]}"#),
            Some("items") => json(r#"{"items": []}"#),
            Some("down") => (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response(),
            Some("slow") => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                json("[]")
            }
            _ => "<html>not json</html>".into_response(),
        }
    }

    async fn spawn_backend() -> SearchApiClient {
        let app = axum::Router::new()
            .route("/api/{domain}/search", axum::routing::get(fake_backend))
            .route(
                "/status",
                axum::routing::get(|| async {
                    axum::Json(serde_json::json!({"status": "API is running"}))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        client(&format!("http://{addr}"))
            .with_timeouts(Duration::from_millis(500), Duration::from_millis(500))
    }

    #[tokio::test]
    async fn test_fetch_accepts_every_envelope() {
        let api = spawn_backend().await;

        let bare = api.fetch(&SearchQuery::grocery("bare").unwrap()).await.unwrap();
        assert_eq!(bare.len(), 2);
        assert_eq!(bare[0].name(), "Amul Milk");
        assert_eq!(bare[0].price(), Some(68.0));

        let results = api.fetch(&SearchQuery::grocery("results").unwrap()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "Brown Bread");

        let products = api.fetch(&SearchQuery::grocery("products").unwrap()).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name(), "Basmati Rice");
    }

    #[tokio::test]
    async fn test_fetch_failures_are_classified() {
        let api = spawn_backend().await;

        let err = api.fetch(&SearchQuery::grocery("items").unwrap()).await.unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponseShape));

        let err = api.fetch(&SearchQuery::grocery("down").unwrap()).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503 }));

        let err = api.fetch(&SearchQuery::grocery("html").unwrap()).await.unwrap_err();
        assert!(matches!(err, FetchError::MalformedBody(_)));

        let err = api.fetch(&SearchQuery::grocery("slow").unwrap()).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_status_probe_against_running_backend() {
        let api = spawn_backend().await;
        assert!(api.check_status().await);
    }
}
