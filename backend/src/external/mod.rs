//! External API integrations

pub mod chatbot;
pub mod ml_inference;
pub mod usgs_feed;

pub use chatbot::ChatbotClient;
pub use ml_inference::MlInferenceClient;
pub use usgs_feed::FeedClient;

use std::time::Duration;

use reqwest::Client;

use crate::error::{AppError, AppResult};

/// Build the HTTP client shared by every upstream integration
pub fn build_http_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))
}
