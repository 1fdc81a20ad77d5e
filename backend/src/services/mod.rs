//! Business logic services for the Hazard Relay

pub mod hazard;
pub mod prediction;

pub use hazard::HazardService;
pub use prediction::{
    PredictionService, PredictionSource, ProbabilitySource, ThreadRngProbability,
};
