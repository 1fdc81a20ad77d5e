//! Asteroid impact prediction models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Impact prediction parameters accepted from clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MlPredictionInput {
    /// Object diameter in kilometres
    #[validate(range(min = 0.001, max = 1000.0, message = "Diameter must be between 0.001 and 1000 km"))]
    pub diameter: f64,

    /// Approach velocity in km/s
    #[validate(range(min = 0.1, max = 100.0, message = "Velocity must be between 0.1 and 100 km/s"))]
    pub velocity: f64,

    #[validate(range(min = 1.0, max = 1000000.0, message = "Distance must be between 1 and 1000000"))]
    pub distance: f64,

    /// Mass in kilograms
    #[validate(range(min = 1.0, max = 1.0e15, message = "Mass must be between 1 and 1e15 kg"))]
    pub mass: f64,

    /// Entry angle in degrees
    #[validate(range(min = 0.0, max = 90.0, message = "Trajectory angle must be between 0 and 90 degrees"))]
    pub trajectory_angle: f64,
}

/// Normalized impact prediction returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlPredictionOutput {
    /// Percentage in [0, 100]
    pub impact_probability: f64,
    pub risk_level: RiskLevel,
    pub potential_damage: String,
    pub recommended_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_energy: Option<f64>,
}

/// Coarse risk tier of a prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Parse a risk level label, ignoring case and surrounding whitespace
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            "critical" => Some(RiskLevel::Critical),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_parsing() {
        assert_eq!(RiskLevel::parse("high"), Some(RiskLevel::High));
        assert_eq!(RiskLevel::parse(" Critical "), Some(RiskLevel::Critical));
        assert_eq!(RiskLevel::parse("MEDIUM"), Some(RiskLevel::Medium));
        assert_eq!(RiskLevel::parse("severe"), None);
    }

    #[test]
    fn test_output_omits_missing_energy() {
        let output = MlPredictionOutput {
            impact_probability: 42.0,
            risk_level: RiskLevel::High,
            potential_damage: "x".to_string(),
            recommended_action: "y".to_string(),
            estimated_energy: None,
        };

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["impactProbability"], 42.0);
        assert_eq!(json["riskLevel"], "high");
        assert!(json.get("estimatedEnergy").is_none());
    }

    #[test]
    fn test_input_uses_camel_case_keys() {
        let input: MlPredictionInput = serde_json::from_value(serde_json::json!({
            "diameter": 1.0,
            "velocity": 20.0,
            "distance": 5000.0,
            "mass": 1.0e9,
            "trajectoryAngle": 45.0
        }))
        .unwrap();

        assert_eq!(input.trajectory_angle, 45.0);
        assert!(input.validate().is_ok());
    }
}
