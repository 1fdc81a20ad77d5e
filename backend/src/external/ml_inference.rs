//! ML inference client
//!
//! Client for the hosted impact-prediction model.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use shared::MlPredictionInput;
use thiserror::Error;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Client for the ML inference service
#[derive(Clone)]
pub struct MlInferenceClient {
    client: Client,
    endpoint: String,
}

/// Request body expected by the model, snake_case on the wire
#[derive(Debug, Serialize, PartialEq)]
pub struct InferenceRequest {
    pub diameter: f64,
    pub velocity: f64,
    pub distance: f64,
    pub mass: f64,
    pub trajectory_angle: f64,
}

impl From<&MlPredictionInput> for InferenceRequest {
    fn from(input: &MlPredictionInput) -> Self {
        Self {
            diameter: input.diameter,
            velocity: input.velocity,
            distance: input.distance,
            mass: input.mass,
            trajectory_angle: input.trajectory_angle,
        }
    }
}

/// Outcome of a call that reached the model
#[derive(Debug)]
pub enum InferenceReply {
    /// 2xx response with a JSON body
    Payload(Value),
    /// Any status outside the success range
    Rejected(StatusCode),
}

#[derive(Debug, Error)]
pub enum InferenceError {
    /// The request never produced a response (DNS, refused, timeout)
    #[error("Inference request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// A success response whose body was not JSON
    #[error("Failed to parse inference response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl MlInferenceClient {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    /// Request a prediction from the model
    pub async fn predict(
        &self,
        input: &MlPredictionInput,
    ) -> Result<InferenceReply, InferenceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&InferenceRequest::from(input))
            .send()
            .await
            .map_err(InferenceError::Transport)?;

        let status = response.status();
        tracing::info!(%status, "Inference service responded");

        if !status.is_success() {
            return Ok(InferenceReply::Rejected(status));
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(InferenceError::Decode)?;

        Ok(InferenceReply::Payload(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_snake_case_angle() {
        let input = MlPredictionInput {
            diameter: 1.5,
            velocity: 30.0,
            distance: 1000.0,
            mass: 2.0e12,
            trajectory_angle: 45.0,
        };

        let json = serde_json::to_value(InferenceRequest::from(&input)).unwrap();
        assert_eq!(json["trajectory_angle"], 45.0);
        assert!(json.get("trajectoryAngle").is_none());
        assert_eq!(json["diameter"], 1.5);
    }
}
