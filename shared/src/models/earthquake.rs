//! Earthquake event model

use serde::{Deserialize, Serialize};

use crate::types::EpochMillis;

/// A single seismic event taken from the hazard feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthquakeEvent {
    pub id: String,
    pub magnitude: f64,
    pub location: String,
    /// Depth in kilometres
    pub depth: f64,
    pub time: EpochMillis,
    pub latitude: f64,
    pub longitude: f64,
    pub url: String,
    pub tsunami: bool,
    /// Number of "felt" reports, null when none were filed
    pub felt: Option<i64>,
    pub significance: i64,
}
