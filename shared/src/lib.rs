//! Shared types and models for the Hazard Relay
//!
//! This crate contains the wire-level domain types served by the backend
//! and the boundary validation for prediction requests.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
