use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use larder::clients::{FetchError, SearchProvider};
use larder::config::Config;
use larder::db::Store;
use larder::models::{GroceryProduct, Platform, Record, SearchQuery};
use larder::state::SharedState;

fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // Discard port: connections are refused immediately
    config.search.base_url = "http://127.0.0.1:9".to_string();
    config.search.request_timeout_seconds = 2;
    config.search.status_timeout_seconds = 1;
    config.synthetic.seed = Some(42);
    config
}

async fn spawn_app() -> Router {
    let state = larder::api::create_app_state_from_config(test_config(), None)
        .await
        .expect("Failed to create app state");
    larder::api::router(state).await
}

struct CatalogueProvider;

#[async_trait]
impl SearchProvider for CatalogueProvider {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<Record>, FetchError> {
        let mut product = GroceryProduct::new(format!("Organic {}", query.text()), Platform::Zepto);
        product.price = Some(120.0);
        product.market_price = Some(150.0);
        Ok(vec![Record::Grocery(product)])
    }
}

async fn spawn_app_with_provider(provider: Arc<dyn SearchProvider>) -> Router {
    let config = test_config();
    let store = Store::in_memory().await.unwrap();
    let search_api = Arc::new(SharedState::build_search_api(&config).unwrap());
    let shared = Arc::new(SharedState::assemble(config, store, search_api, provider));
    larder::api::router(larder::api::create_app_state(shared, None)).await
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_search_with_backend_down_returns_sample_data() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/grocery/search?q=apple").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["origin"], "synthetic");
    assert_eq!(body["data"]["sample_data"], true);
    assert_eq!(body["data"]["notice"], "Using sample data");

    let results = body["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 8);
    assert_eq!(
        body["data"]["cards"].as_array().unwrap().len(),
        results.len()
    );
}

#[tokio::test]
async fn test_search_from_remote_provider() {
    let app = spawn_app_with_provider(Arc::new(CatalogueProvider)).await;

    let (status, body) = send(&app, "GET", "/api/grocery/search?q=honey&related=false").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["origin"], "remote");
    assert_eq!(body["data"]["sample_data"], false);
    assert!(body["data"].get("notice").is_none());
    assert_eq!(body["data"]["cards"][0]["title"], "Organic honey");
    assert_eq!(body["data"]["cards"][0]["original_price_label"], "₹150");

    let (_, again) = send(&app, "GET", "/api/grocery/search?q=honey&related=false").await;
    assert_eq!(again["data"]["origin"], "cache");
}

#[tokio::test]
async fn test_restaurant_search_accepts_city() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/restaurant/search?q=biryani&city=Pune",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["domain"], "restaurant");
    assert!(!body["data"]["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_validation() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/grocery/search?q=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "GET", "/api/furniture/search?q=chair").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_favorites_lifecycle() {
    let app = spawn_app().await;
    let base = "/api/users/u1/favorites/grocery";

    let (status, body) = send(&app, "GET", base).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, "PUT", &format!("{base}/apple-blinkit")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["favorite"], true);
    assert_eq!(body["data"]["changed"], true);

    let (_, body) = send(&app, "PUT", &format!("{base}/apple-blinkit")).await;
    assert_eq!(body["data"]["changed"], false);

    let (_, body) = send(&app, "GET", base).await;
    assert_eq!(body["data"]["items"], serde_json::json!(["apple-blinkit"]));

    let (_, body) = send(&app, "GET", "/api/users/u1/favorites/restaurant").await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    let (_, body) = send(&app, "DELETE", &format!("{base}/apple-blinkit")).await;
    assert_eq!(body["data"]["favorite"], false);
    assert_eq!(body["data"]["changed"], true);

    let (_, body) = send(&app, "DELETE", &format!("{base}/apple-blinkit")).await;
    assert_eq!(body["data"]["changed"], false);
}

#[tokio::test]
async fn test_popular_endpoint() {
    let app = spawn_app_with_provider(Arc::new(CatalogueProvider)).await;

    send(&app, "GET", "/api/grocery/search?q=honey&related=false").await;

    let (status, body) = send(&app, "GET", "/api/grocery/popular?limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["queries"][0]["query"], "honey");
    assert_eq!(body["data"]["queries"][0]["search_count"], 1);
}

#[tokio::test]
async fn test_system_status_reports_backend_offline() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/system/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], true);
    assert_eq!(body["data"]["search_api"], false);
    assert_eq!(body["data"]["search_base_url"], "http://127.0.0.1:9/");
}

#[tokio::test]
async fn test_health_and_metrics() {
    let app = spawn_app().await;

    let (status, body) = send(&app, "GET", "/api/system/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
