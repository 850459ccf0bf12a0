// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    async_trait,
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing,
    Router,
};
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use page_info_server::{
    extract::encoding::EncodingRsDecoder,
    fetch::{FetchError, FetchedPage, PageFetcher},
    handlers,
    state::AppState,
};

/// What the stub fetcher hands back for every request.
#[derive(Clone)]
pub enum StubResponse {
    Page {
        content_type: Option<String>,
        body: Bytes,
    },
    Status(u16),
}

/// `PageFetcher` that serves a canned response and records every URL it was
/// asked for, so tests can assert on how many fetches happened.
pub struct StubFetcher {
    response: StubResponse,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn html(content_type: Option<&str>, body: impl Into<Bytes>) -> Arc<Self> {
        Arc::new(StubFetcher {
            response: StubResponse::Page {
                content_type: content_type.map(str::to_string),
                body: body.into(),
            },
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn status(status: u16) -> Arc<Self> {
        Arc::new(StubFetcher {
            response: StubResponse::Status(status),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());
        match &self.response {
            StubResponse::Page { content_type, body } => Ok(FetchedPage {
                status: 200,
                content_type: content_type.clone(),
                body: body.clone(),
            }),
            StubResponse::Status(status) => Err(FetchError::Status(*status)),
        }
    }
}

/// Build the application router wired to the given fetcher.
pub fn create_test_app(fetcher: Arc<dyn PageFetcher>) -> Router {
    let state = AppState {
        fetcher,
        decoder: Arc::new(EncodingRsDecoder),
    };
    Router::new()
        .route("/health", routing::get(handlers::health_check))
        .route("/", routing::get(handlers::page::get_page_info))
        .route("/page", routing::get(handlers::page::get_page_info))
        .with_state(state)
}

/// Percent-encode a query parameter value.
pub fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get_raw(app, uri).await;
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get_with_headers(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let req = builder.body(Body::empty()).unwrap();
    let (status, _, body) = send(app, req).await;
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Returns status, the `Content-Type` header and the raw body.
pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, Option<String>, Bytes) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Option<String>, Bytes) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, bytes)
}
