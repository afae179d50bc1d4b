// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use card_fetcher::{
    fetch::{Scraper, ScraperConfig},
    handlers,
    state::AppState,
};

pub const PNG: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

/// Scraper settings for tests: short timeout, no retries.
pub fn test_config() -> ScraperConfig {
    ScraperConfig {
        user_agent: "CardFetcherTest/1.0".into(),
        timeout: Duration::from_secs(5),
        max_retries: 0,
        ..ScraperConfig::default()
    }
}

pub fn test_scraper(config: ScraperConfig) -> Scraper {
    Scraper::new(config).expect("Failed to build test scraper")
}

/// Build the application router around a scraper.
pub fn create_test_app(config: ScraperConfig) -> Router {
    let state = AppState {
        scraper: Arc::new(test_scraper(config)),
    };
    Router::new()
        .route("/", get(handlers::cards::get_card))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_origin(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind origin");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A local port with nothing listening on it.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Accept connections and drop them without answering. Returns the base URL
/// and the number of connections accepted so far.
pub async fn spawn_hangup_origin() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            drop(socket);
        }
    });
    (format!("http://{addr}"), accepted)
}

/// Counts how often a route was hit.
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn record(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Percent-encode a URL for use as the `url` query parameter.
pub fn card_uri(url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    format!("/?url={encoded}")
}
