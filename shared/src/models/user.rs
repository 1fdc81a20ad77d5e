//! User account models
//!
//! Held by the in-memory store only; no endpoint exposes them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
}

/// Fields supplied when creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertUser {
    pub username: String,
    pub password: String,
}

impl User {
    /// Create a user with a freshly generated identifier
    pub fn from_insert(insert: InsertUser) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: insert.username,
            password: insert.password,
        }
    }
}
