//! HTTP handlers for earthquake and tsunami endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::{EarthquakeEvent, TsunamiAlert};
use crate::AppState;

/// GET /api/earthquakes
pub async fn list_earthquakes(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EarthquakeEvent>>> {
    Ok(Json(state.hazards.earthquakes().await))
}

/// GET /api/earthquakes/refresh
pub async fn refresh_earthquakes(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EarthquakeEvent>>> {
    Ok(Json(state.hazards.refresh_earthquakes().await))
}

/// GET /api/tsunami-alerts
pub async fn list_tsunami_alerts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TsunamiAlert>>> {
    Ok(Json(state.hazards.tsunami_alerts().await))
}

/// GET /api/tsunami-alerts/refresh
pub async fn refresh_tsunami_alerts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TsunamiAlert>>> {
    Ok(Json(state.hazards.refresh_tsunami_alerts().await))
}
