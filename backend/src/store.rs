//! In-memory store for hazard data
//!
//! Each collection is held behind an `Arc` and replaced wholesale, so a
//! reader always sees a complete list from one fetch.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::models::{EarthquakeEvent, InsertUser, TsunamiAlert, User};

/// One cached collection together with the time it was last written
struct Snapshot<T> {
    items: Arc<Vec<T>>,
    written_at: Option<DateTime<Utc>>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            written_at: None,
        }
    }
}

/// Summary of the cache contents, reported by the health endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub earthquakes: usize,
    pub earthquakes_fetched_at: Option<DateTime<Utc>>,
    pub tsunami_alerts: usize,
    pub tsunami_alerts_fetched_at: Option<DateTime<Utc>>,
}

/// Process-lifetime store owned by the application state
#[derive(Default)]
pub struct MemStore {
    earthquakes: RwLock<Snapshot<EarthquakeEvent>>,
    tsunami_alerts: RwLock<Snapshot<TsunamiAlert>>,
    users: RwLock<HashMap<String, User>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_earthquakes(&self) -> Vec<EarthquakeEvent> {
        let items = Arc::clone(&self.earthquakes.read().await.items);
        items.as_ref().clone()
    }

    /// Replace the cached earthquake list
    pub async fn set_earthquakes(&self, earthquakes: Vec<EarthquakeEvent>) {
        let mut snapshot = self.earthquakes.write().await;
        snapshot.items = Arc::new(earthquakes);
        snapshot.written_at = Some(Utc::now());
    }

    pub async fn get_tsunami_alerts(&self) -> Vec<TsunamiAlert> {
        let items = Arc::clone(&self.tsunami_alerts.read().await.items);
        items.as_ref().clone()
    }

    /// Replace the cached tsunami alert list
    pub async fn set_tsunami_alerts(&self, alerts: Vec<TsunamiAlert>) {
        let mut snapshot = self.tsunami_alerts.write().await;
        snapshot.items = Arc::new(alerts);
        snapshot.written_at = Some(Utc::now());
    }

    pub async fn status(&self) -> CacheStatus {
        let earthquakes = self.earthquakes.read().await;
        let tsunami_alerts = self.tsunami_alerts.read().await;

        CacheStatus {
            earthquakes: earthquakes.items.len(),
            earthquakes_fetched_at: earthquakes.written_at,
            tsunami_alerts: tsunami_alerts.items.len(),
            tsunami_alerts_fetched_at: tsunami_alerts.written_at,
        }
    }

    pub async fn get_user(&self, id: &str) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// Store a new user under a generated identifier
    ///
    /// Usernames are not checked for uniqueness here.
    pub async fn create_user(&self, insert: InsertUser) -> User {
        let user = User::from_insert(insert);
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        user
    }
}
