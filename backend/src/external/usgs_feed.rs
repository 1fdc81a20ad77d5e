//! USGS hazard feed client
//!
//! Fetches the GeoJSON summary feed and derives the earthquake list and the
//! tsunami alert list from it.

use reqwest::Client;
use serde::Deserialize;
use shared::{classify_severity, wave_height_band, EarthquakeEvent, TsunamiAlert};

use crate::error::{AppError, AppResult};

/// Hazard feed client
#[derive(Clone)]
pub struct FeedClient {
    client: Client,
    feed_url: String,
}

/// GeoJSON feature collection returned by the feed
#[derive(Debug, Clone, Deserialize)]
pub struct FeedDocument {
    pub features: Vec<FeedFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedFeature {
    pub id: String,
    pub properties: FeedProperties,
    pub geometry: FeedGeometry,
}

/// Feature properties; counts and times are read as floats and truncated at
/// the mapping step
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedProperties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    pub time: Option<f64>,
    pub url: Option<String>,
    pub tsunami: Option<f64>,
    pub felt: Option<f64>,
    pub sig: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedGeometry {
    /// `[longitude, latitude, depth]`
    #[serde(default)]
    pub coordinates: Vec<Option<f64>>,
}

impl FeedProperties {
    fn is_tsunami(&self) -> bool {
        self.tsunami == Some(1.0)
    }

    /// Place name, treating an empty string as absent
    fn place(&self) -> Option<&str> {
        self.place.as_deref().filter(|p| !p.is_empty())
    }

    /// Event time in epoch millis, truncated toward zero
    fn time(&self) -> i64 {
        self.time.map_or(0, |t| t as i64)
    }
}

impl FeedGeometry {
    fn coordinate(&self, index: usize) -> f64 {
        self.coordinates.get(index).copied().flatten().unwrap_or(0.0)
    }
}

impl FeedClient {
    /// Create a new FeedClient
    pub fn new(client: Client, feed_url: String) -> Self {
        Self { client, feed_url }
    }

    /// Download and decode the feed document
    pub async fn fetch_document(&self) -> AppResult<FeedDocument> {
        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .map_err(|e| AppError::FeedUnavailable(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::FeedUnavailable(format!(
                "Feed returned {}",
                response.status()
            )));
        }

        let document: FeedDocument = response
            .json()
            .await
            .map_err(|e| AppError::FeedUnavailable(format!("Failed to parse feed: {}", e)))?;

        tracing::debug!(features = document.features.len(), "Fetched hazard feed");
        Ok(document)
    }

    /// Fetch the earthquake view, most recent first
    ///
    /// Failures are logged and produce an empty list.
    pub async fn fetch_earthquakes(&self) -> Vec<EarthquakeEvent> {
        match self.fetch_document().await {
            Ok(document) => earthquakes_from_feed(&document),
            Err(e) => {
                tracing::error!("Error fetching earthquake data: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch the tsunami alert view, most recent first
    ///
    /// Failures are logged and produce an empty list.
    pub async fn fetch_tsunami_alerts(&self) -> Vec<TsunamiAlert> {
        match self.fetch_document().await {
            Ok(document) => tsunami_alerts_from_feed(&document),
            Err(e) => {
                tracing::error!("Error fetching tsunami data: {}", e);
                Vec::new()
            }
        }
    }
}

/// Convert a single feed feature to an earthquake record
pub fn earthquake_from_feature(feature: &FeedFeature) -> EarthquakeEvent {
    let props = &feature.properties;

    EarthquakeEvent {
        id: feature.id.clone(),
        magnitude: props.mag.unwrap_or(0.0),
        location: props.place().unwrap_or("Unknown location").to_string(),
        depth: feature.geometry.coordinate(2),
        time: props.time(),
        latitude: feature.geometry.coordinate(1),
        longitude: feature.geometry.coordinate(0),
        url: props.url.clone().unwrap_or_default(),
        tsunami: props.is_tsunami(),
        // A zero count is reported as "no reports"
        felt: props.felt.map(|felt| felt as i64).filter(|&felt| felt != 0),
        significance: props.sig.map_or(0, |sig| sig as i64),
    }
}

/// Every feature as an earthquake record, sorted by time descending
pub fn earthquakes_from_feed(document: &FeedDocument) -> Vec<EarthquakeEvent> {
    let mut earthquakes: Vec<EarthquakeEvent> =
        document.features.iter().map(earthquake_from_feature).collect();
    earthquakes.sort_by(|a, b| b.time.cmp(&a.time));
    earthquakes
}

/// Build the alert for a tsunami-flagged feature
pub fn tsunami_alert_from_feature(feature: &FeedFeature) -> TsunamiAlert {
    let props = &feature.properties;
    let magnitude = match props.mag {
        Some(mag) => mag.to_string(),
        None => "unknown".to_string(),
    };

    TsunamiAlert {
        id: feature.id.clone(),
        event: props.place().unwrap_or("Tsunami Event").to_string(),
        severity: classify_severity(props.mag),
        areas: vec![props.place().unwrap_or("Unknown").to_string()],
        issue_time: props.time(),
        expires: None,
        wave_height: Some(wave_height_band(props.mag).to_string()),
        message: format!(
            "Earthquake of magnitude {} detected. Tsunami possible.",
            magnitude
        ),
        url: props.url.clone().unwrap_or_default(),
    }
}

/// Alerts for tsunami-flagged features, sorted by issue time descending
pub fn tsunami_alerts_from_feed(document: &FeedDocument) -> Vec<TsunamiAlert> {
    let mut alerts: Vec<TsunamiAlert> = document
        .features
        .iter()
        .filter(|feature| feature.properties.is_tsunami())
        .map(tsunami_alert_from_feature)
        .collect();
    alerts.sort_by(|a, b| b.issue_time.cmp(&a.issue_time));
    alerts
}
