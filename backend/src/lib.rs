//! Hazard Relay - Backend Server
//!
//! Serves cached USGS earthquake and tsunami data and relays chatbot and
//! asteroid-impact prediction requests to their upstream services.

use std::{any::Any, sync::Arc};

use axum::{response::IntoResponse, response::Response, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use error::{AppError, AppResult};
use external::{build_http_client, ChatbotClient, FeedClient, MlInferenceClient};
use services::{HazardService, PredictionService, ProbabilitySource, ThreadRngProbability};
use store::MemStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<MemStore>,
    pub hazards: HazardService,
    pub chatbot: ChatbotClient,
    pub predictions: PredictionService,
}

impl AppState {
    /// Build state with the thread RNG driving fallback predictions
    pub fn new(config: Config) -> AppResult<Self> {
        Self::with_probability_source(config, Arc::new(ThreadRngProbability))
    }

    /// Build state with a caller-supplied probability source
    pub fn with_probability_source(
        config: Config,
        probability: Arc<dyn ProbabilitySource>,
    ) -> AppResult<Self> {
        let http = build_http_client(config.upstream.timeout())?;
        let store = Arc::new(MemStore::new());

        let feed = FeedClient::new(http.clone(), config.upstream.feed_url.clone());
        let chatbot = ChatbotClient::new(http.clone(), config.upstream.chatbot_url.clone());
        let inference = MlInferenceClient::new(http, config.upstream.ml_predict_url.clone());

        Ok(Self {
            hazards: HazardService::new(store.clone(), feed),
            predictions: PredictionService::new(inference, probability),
            chatbot,
            store,
            config: Arc::new(config),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .with_state(state);

    with_middleware(router)
}

/// Wrap a router in the panic, tracing and CORS layers
pub fn with_middleware(router: Router) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Root endpoint
async fn root() -> &'static str {
    "Hazard Relay API v1.0"
}

/// Render a handler panic as the generic 500 body
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("Handler panicked: {}", detail)).into_response()
}
