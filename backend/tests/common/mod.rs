//! Shared helpers for the integration tests
//!
//! Upstream services are simulated by small axum servers bound to an
//! ephemeral local port.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::routing::any;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::ServiceExt;

use hazard_relay::config::{ServerConfig, UpstreamConfig};
use hazard_relay::services::ProbabilitySource;
use hazard_relay::{create_app, AppState, Config};

/// Probability source that always yields the same draw
pub struct FixedProbability(pub f64);

impl ProbabilitySource for FixedProbability {
    fn impact_probability(&self) -> f64 {
        self.0
    }
}

/// Draw used by every test app
pub const FIXED_PROBABILITY: f64 = 12.3456;

/// Call log of a simulated upstream
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

impl Recorder {
    async fn record(&self, body: &Bytes) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_body.lock().await = serde_json::from_slice(body).ok();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn last_body(&self) -> Option<Value> {
        self.last_body.lock().await.clone()
    }
}

/// Serve `router` on a local port and return its base URL
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/", addr)
}

/// Upstream answering every request with `status` and a JSON body
pub async fn spawn_json_upstream(status: StatusCode, reply: Value) -> (String, Recorder) {
    let recorder = Recorder::default();
    let router = Router::new()
        .route(
            "/",
            any(move |State(rec): State<Recorder>, body: Bytes| {
                let reply = reply.clone();
                async move {
                    rec.record(&body).await;
                    (status, Json(reply))
                }
            }),
        )
        .with_state(recorder.clone());

    (spawn_upstream(router).await, recorder)
}

/// Upstream answering every request with `status` and a plain-text body
pub async fn spawn_text_upstream(status: StatusCode, reply: &'static str) -> (String, Recorder) {
    let recorder = Recorder::default();
    let router = Router::new()
        .route(
            "/",
            any(move |State(rec): State<Recorder>, body: Bytes| async move {
                rec.record(&body).await;
                (status, reply)
            }),
        )
        .with_state(recorder.clone());

    (spawn_upstream(router).await, recorder)
}

/// Upstream that accepts requests and never answers in time
pub async fn spawn_hanging_upstream() -> (String, Recorder) {
    let recorder = Recorder::default();
    let router = Router::new()
        .route(
            "/",
            any(|State(rec): State<Recorder>, body: Bytes| async move {
                rec.record(&body).await;
                tokio::time::sleep(Duration::from_secs(30)).await;
                StatusCode::OK
            }),
        )
        .with_state(recorder.clone());

    (spawn_upstream(router).await, recorder)
}

/// URL of a local port nothing listens on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

/// Config pointing every upstream at the given URLs
pub fn test_config(feed_url: &str, chatbot_url: &str, ml_predict_url: &str) -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        upstream: UpstreamConfig {
            feed_url: feed_url.to_string(),
            chatbot_url: chatbot_url.to_string(),
            ml_predict_url: ml_predict_url.to_string(),
            timeout_secs: 5,
        },
    }
}

/// Build the full router plus a handle on its state
pub fn build_test_app(config: Config) -> (Router, AppState) {
    let state =
        AppState::with_probability_source(config, Arc::new(FixedProbability(FIXED_PROBABILITY)))
            .unwrap();
    (create_app(state.clone()), state)
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_raw(app: &Router, uri: &str, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A small feed with two tsunami-flagged events out of three
pub fn sample_feed() -> Value {
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [
            {
                "id": "ak0001",
                "properties": {
                    "mag": 2.1, "place": "30 km NW of Anchorage, Alaska",
                    "time": 1700000100000_i64, "url": "https://earthquake.usgs.gov/ak0001",
                    "tsunami": 0, "felt": 3, "sig": 68
                },
                "geometry": { "coordinates": [-150.2, 61.4, 40.5] }
            },
            {
                "id": "us0002",
                "properties": {
                    "mag": 7.2, "place": "off the east coast of Honshu, Japan",
                    "time": 1700000300000_i64, "url": "https://earthquake.usgs.gov/us0002",
                    "tsunami": 1, "felt": 540, "sig": 1200
                },
                "geometry": { "coordinates": [142.4, 38.1, 24.0] }
            },
            {
                "id": "us0003",
                "properties": {
                    "mag": 6.6, "place": "Kermadec Islands region",
                    "time": 1700000200000_i64, "url": "https://earthquake.usgs.gov/us0003",
                    "tsunami": 1, "felt": null, "sig": 670
                },
                "geometry": { "coordinates": [-178.1, -29.9, 10.0] }
            }
        ]
    })
}
