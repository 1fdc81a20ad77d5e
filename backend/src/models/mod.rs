//! Domain models for the Hazard Relay
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
