//! HTTP handler for the chatbot relay

use axum::{
    body::Bytes,
    extract::State,
    http::header::CONTENT_TYPE,
    response::IntoResponse,
};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// POST /api/chatbot
///
/// Expects `{"question": "..."}` and relays the chatbot's JSON reply as-is.
pub async fn ask_chatbot(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let request: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Unreadable chatbot request body: {}", e);
        AppError::QuestionRequired
    })?;

    let question = request
        .get("question")
        .and_then(Value::as_str)
        .filter(|q| !q.is_empty())
        .ok_or(AppError::QuestionRequired)?;

    let reply = state.chatbot.ask(question).await?;
    Ok(([(CONTENT_TYPE, "application/json")], reply))
}
