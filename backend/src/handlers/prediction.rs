//! HTTP handler for impact predictions

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderName,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use shared::{parse_prediction_input, FieldViolation, InvalidPredictionInput};

use crate::error::AppResult;
use crate::AppState;

/// Tells callers whether the body came from the model or the local fallback
pub const PREDICTION_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-prediction-source");

/// POST /api/ml/predict
pub async fn predict_impact(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let raw: Value = serde_json::from_slice(&body).map_err(|e| InvalidPredictionInput {
        violations: vec![FieldViolation::body(
            "invalid_json",
            format!("Malformed JSON body: {}", e),
        )],
    })?;

    let input = parse_prediction_input(&raw)?;
    let prediction = state.predictions.predict(&input).await?;

    Ok((
        [(PREDICTION_SOURCE_HEADER, prediction.source.as_str())],
        Json(prediction.output),
    ))
}
