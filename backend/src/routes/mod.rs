//! Route definitions for the Hazard Relay

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Earthquake feed
        .route("/earthquakes", get(handlers::list_earthquakes))
        .route("/earthquakes/refresh", get(handlers::refresh_earthquakes))
        // Tsunami alerts
        .route("/tsunami-alerts", get(handlers::list_tsunami_alerts))
        .route("/tsunami-alerts/refresh", get(handlers::refresh_tsunami_alerts))
        // Relays
        .route("/chatbot", post(handlers::ask_chatbot))
        .route("/ml/predict", post(handlers::predict_impact))
}
