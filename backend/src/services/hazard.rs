//! Hazard data service
//!
//! Read-through access to the cached earthquake and tsunami lists, backed by
//! the hazard feed.

use std::sync::Arc;

use crate::external::FeedClient;
use crate::models::{EarthquakeEvent, TsunamiAlert};
use crate::store::MemStore;

/// Hazard data service
#[derive(Clone)]
pub struct HazardService {
    store: Arc<MemStore>,
    feed: FeedClient,
}

impl HazardService {
    pub fn new(store: Arc<MemStore>, feed: FeedClient) -> Self {
        Self { store, feed }
    }

    /// Cached earthquakes, fetching them when the cache is empty
    ///
    /// An empty list counts as a miss, so a feed that keeps returning nothing
    /// (or keeps failing) is re-fetched on every call.
    pub async fn earthquakes(&self) -> Vec<EarthquakeEvent> {
        let cached = self.store.get_earthquakes().await;
        if !cached.is_empty() {
            return cached;
        }

        tracing::debug!("Earthquake cache empty, fetching feed");
        self.refresh_earthquakes().await
    }

    /// Fetch earthquakes and replace the cached list
    pub async fn refresh_earthquakes(&self) -> Vec<EarthquakeEvent> {
        let earthquakes = self.feed.fetch_earthquakes().await;
        self.store.set_earthquakes(earthquakes.clone()).await;
        tracing::info!(count = earthquakes.len(), "Earthquake cache refreshed");
        earthquakes
    }

    /// Cached tsunami alerts, fetching them when the cache is empty
    pub async fn tsunami_alerts(&self) -> Vec<TsunamiAlert> {
        let cached = self.store.get_tsunami_alerts().await;
        if !cached.is_empty() {
            return cached;
        }

        tracing::debug!("Tsunami alert cache empty, fetching feed");
        self.refresh_tsunami_alerts().await
    }

    /// Fetch tsunami alerts and replace the cached list
    pub async fn refresh_tsunami_alerts(&self) -> Vec<TsunamiAlert> {
        let alerts = self.feed.fetch_tsunami_alerts().await;
        self.store.set_tsunami_alerts(alerts.clone()).await;
        tracing::info!(count = alerts.len(), "Tsunami alert cache refreshed");
        alerts
    }
}
