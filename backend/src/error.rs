//! Error handling for the Hazard Relay
//!
//! Every error renders as a JSON body with a short public message. Internal
//! detail is only written to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{FieldViolation, InvalidPredictionInput};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Question is required")]
    QuestionRequired,

    #[error("{0}")]
    InvalidPrediction(#[from] InvalidPredictionInput),

    // External service errors
    #[error("Hazard feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("Chatbot service error: {0}")]
    ChatbotUnavailable(String),

    #[error("Prediction service error: {0}")]
    PredictionFailed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl AppError {
    /// HTTP status, public code, and public message for this error
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AppError::QuestionRequired => (
                StatusCode::BAD_REQUEST,
                "QUESTION_REQUIRED",
                "Question is required",
            ),
            AppError::InvalidPrediction(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Invalid prediction parameters",
            ),
            AppError::FeedUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "FEED_UNAVAILABLE",
                "Failed to fetch hazard data",
            ),
            AppError::ChatbotUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CHATBOT_ERROR",
                "Failed to get chatbot response",
            ),
            AppError::PredictionFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PREDICTION_ERROR",
                "Failed to get ML prediction",
            ),
            AppError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                "Server is misconfigured",
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        let details = match self {
            AppError::InvalidPrediction(invalid) => Some(invalid.violations),
            _ => None,
        };

        let body = ErrorResponse {
            error: message.to_string(),
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
