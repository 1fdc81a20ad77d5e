//! Impact prediction service
//!
//! Relays validated input to the inference service. When the service cannot
//! be reached, or answers with a non-success status, a local heuristic
//! estimate is returned instead.

use std::sync::Arc;

use rand::Rng;
use serde_json::Value;
use shared::{round2, MlPredictionInput, MlPredictionOutput, RiskLevel};

use crate::error::{AppError, AppResult};
use crate::external::ml_inference::{InferenceError, InferenceReply, MlInferenceClient};

/// Source of the synthetic impact probability used by the fallback
pub trait ProbabilitySource: Send + Sync {
    /// A percentage in `[0, 100]`
    fn impact_probability(&self) -> f64;
}

/// Uniform draw from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngProbability;

impl ProbabilitySource for ThreadRngProbability {
    fn impact_probability(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..=100.0)
    }
}

/// Where a prediction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    Model,
    Fallback,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionSource::Model => "model",
            PredictionSource::Fallback => "fallback",
        }
    }
}

/// A prediction together with its origin
#[derive(Debug, Clone)]
pub struct Prediction {
    pub output: MlPredictionOutput,
    pub source: PredictionSource,
}

/// Impact prediction service
#[derive(Clone)]
pub struct PredictionService {
    client: MlInferenceClient,
    probability: Arc<dyn ProbabilitySource>,
}

impl PredictionService {
    pub fn new(client: MlInferenceClient, probability: Arc<dyn ProbabilitySource>) -> Self {
        Self {
            client,
            probability,
        }
    }

    /// Predict impact outcome for already validated input
    pub async fn predict(&self, input: &MlPredictionInput) -> AppResult<Prediction> {
        match self.client.predict(input).await {
            Ok(InferenceReply::Payload(raw)) => Ok(Prediction {
                output: normalize_prediction(&raw),
                source: PredictionSource::Model,
            }),
            Ok(InferenceReply::Rejected(status)) => {
                tracing::warn!(%status, "Inference service rejected request, using fallback prediction");
                Ok(self.fallback(input))
            }
            Err(InferenceError::Transport(e)) => {
                tracing::warn!("Inference service unreachable, using fallback prediction: {}", e);
                Ok(self.fallback(input))
            }
            Err(e @ InferenceError::Decode(_)) => Err(AppError::PredictionFailed(e.to_string())),
        }
    }

    fn fallback(&self, input: &MlPredictionInput) -> Prediction {
        Prediction {
            output: fallback_prediction(input, self.probability.impact_probability()),
            source: PredictionSource::Fallback,
        }
    }
}

/// Local heuristic estimate
///
/// `probability` is the raw percentage draw; it is rounded here.
pub fn fallback_prediction(input: &MlPredictionInput, probability: f64) -> MlPredictionOutput {
    let large = input.diameter > 1.0;

    let risk_level = if large {
        RiskLevel::High
    } else if input.velocity > 50.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let (potential_damage, recommended_action) = if large {
        (
            "Significant regional damage expected",
            "Immediate evacuation and deflection mission required",
        )
    } else {
        (
            "Localized damage possible",
            "Continue monitoring and prepare response plans",
        )
    };

    MlPredictionOutput {
        impact_probability: round2(probability.clamp(0.0, 100.0)),
        risk_level,
        potential_damage: potential_damage.to_string(),
        recommended_action: recommended_action.to_string(),
        estimated_energy: Some(round2(input.diameter * input.velocity * 0.5)),
    }
}

/// Normalize a model response into the public prediction shape
///
/// Each field is read from its snake_case key first and its camelCase key
/// second. Null, false, zero and empty-string values fall through to the
/// next key and then to the default.
pub fn normalize_prediction(raw: &Value) -> MlPredictionOutput {
    let impact_probability = first_present(raw, "impact_probability", "impactProbability")
        .and_then(as_number)
        .unwrap_or(0.0);

    let risk_level = match first_present(raw, "risk_level", "riskLevel") {
        None => RiskLevel::default(),
        Some(value) => value.as_str().and_then(RiskLevel::parse).unwrap_or_else(|| {
            tracing::warn!(%value, "Unrecognized risk level from inference service");
            RiskLevel::default()
        }),
    };

    let potential_damage = first_present(raw, "potential_damage", "potentialDamage")
        .map(as_text)
        .unwrap_or_else(|| "Unknown".to_string());

    let recommended_action = first_present(raw, "recommended_action", "recommendedAction")
        .map(as_text)
        .unwrap_or_else(|| "Monitor closely".to_string());

    let estimated_energy =
        first_present(raw, "estimated_energy", "estimatedEnergy").and_then(as_number);

    MlPredictionOutput {
        impact_probability,
        risk_level,
        potential_damage,
        recommended_action,
        estimated_energy,
    }
}

fn first_present<'a>(raw: &'a Value, snake: &str, camel: &str) -> Option<&'a Value> {
    [snake, camel]
        .into_iter()
        .filter_map(|key| raw.get(key))
        .find(|value| is_present(value))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => f.to_string(),
            None => n.to_string(),
        },
        other => other.to_string(),
    }
}
