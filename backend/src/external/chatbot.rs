//! Chatbot client
//!
//! Posts a question to the external chatbot and hands back its JSON reply
//! byte for byte.

use axum::body::Bytes;
use reqwest::Client;
use serde::{de::IgnoredAny, Serialize};

use crate::error::{AppError, AppResult};

/// Client for the external chatbot service
#[derive(Clone)]
pub struct ChatbotClient {
    client: Client,
    endpoint: String,
}

/// Request body sent to the chatbot
#[derive(Debug, Serialize)]
struct ChatbotRequest<'a> {
    question: &'a str,
}

impl ChatbotClient {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    /// Ask the chatbot a question
    ///
    /// The reply must be JSON but is returned as the raw upstream body, so key
    /// order and number formatting survive the relay.
    pub async fn ask(&self, question: &str) -> AppResult<Bytes> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatbotRequest { question })
            .send()
            .await
            .map_err(|e| AppError::ChatbotUnavailable(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ChatbotUnavailable(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::ChatbotUnavailable(format!("Failed to read response: {}", e)))?;

        serde_json::from_slice::<IgnoredAny>(&body)
            .map_err(|e| AppError::ChatbotUnavailable(format!("Failed to parse response: {}", e)))?;

        Ok(body)
    }
}
