//! Boundary validation for the Hazard Relay
//!
//! Prediction requests are checked field by field so a rejection can name
//! every offending parameter at once.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

use crate::models::MlPredictionInput;

/// Prediction parameters in wire order, paired with their Rust field names
const PREDICTION_FIELDS: [(&str, &str); 5] = [
    ("diameter", "diameter"),
    ("velocity", "velocity"),
    ("distance", "distance"),
    ("mass", "mass"),
    ("trajectoryAngle", "trajectory_angle"),
];

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl FieldViolation {
    fn for_field(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Violation that concerns the request body as a whole
    pub fn body(code: &str, message: impl Into<String>) -> Self {
        Self {
            field: None,
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Rejected prediction request
#[derive(Debug, Clone, Error)]
#[error("Invalid prediction parameters ({} violation(s))", .violations.len())]
pub struct InvalidPredictionInput {
    pub violations: Vec<FieldViolation>,
}

impl InvalidPredictionInput {
    pub fn fields(&self) -> Vec<&str> {
        self.violations
            .iter()
            .filter_map(|v| v.field.as_deref())
            .collect()
    }
}

/// Validate a decoded JSON body and build the prediction input
///
/// Every field must be a JSON number inside its inclusive range; strings are
/// not coerced.
pub fn parse_prediction_input(body: &Value) -> Result<MlPredictionInput, InvalidPredictionInput> {
    let Some(object) = body.as_object() else {
        return Err(InvalidPredictionInput {
            violations: vec![FieldViolation::body(
                "invalid_type",
                format!("Expected object, received {}", json_type_name(body)),
            )],
        });
    };

    let mut violations = Vec::new();
    let mut values = [f64::NAN; 5];

    for (index, (wire, _)) in PREDICTION_FIELDS.iter().enumerate() {
        match object.get(*wire) {
            None | Some(Value::Null) => {
                violations.push(FieldViolation::for_field(wire, "required", "Required"));
            }
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) => values[index] = v,
                None => violations.push(FieldViolation::for_field(
                    wire,
                    "invalid_type",
                    "Expected a finite number",
                )),
            },
            Some(other) => violations.push(FieldViolation::for_field(
                wire,
                "invalid_type",
                format!("Expected number, received {}", json_type_name(other)),
            )),
        }
    }

    let input = MlPredictionInput {
        diameter: values[0],
        velocity: values[1],
        distance: values[2],
        mass: values[3],
        trajectory_angle: values[4],
    };

    if let Err(errors) = input.validate() {
        let field_errors = errors.field_errors();
        for (wire, rust) in PREDICTION_FIELDS {
            // Fields with a type problem already carry their violation.
            if violations.iter().any(|v| v.field.as_deref() == Some(wire)) {
                continue;
            }
            let Some(errs) = field_errors.get(rust).or_else(|| field_errors.get(wire)) else {
                continue;
            };
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is out of range", wire));
                violations.push(FieldViolation::for_field(wire, &err.code, message));
            }
        }
    }

    if violations.is_empty() {
        Ok(input)
    } else {
        violations.sort_by_key(|v| field_position(v.field.as_deref()));
        Err(InvalidPredictionInput { violations })
    }
}

fn field_position(field: Option<&str>) -> usize {
    field
        .and_then(|f| PREDICTION_FIELDS.iter().position(|(wire, _)| *wire == f))
        .unwrap_or(PREDICTION_FIELDS.len())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "diameter": 0.5,
            "velocity": 20.0,
            "distance": 384400.0,
            "mass": 1.0e10,
            "trajectoryAngle": 45.0
        })
    }

    fn with_field(field: &str, value: Value) -> Value {
        let mut body = valid_body();
        body[field] = value;
        body
    }

    #[test]
    fn test_valid_input_parses() {
        let input = parse_prediction_input(&valid_body()).unwrap();
        assert_eq!(input.diameter, 0.5);
        assert_eq!(input.trajectory_angle, 45.0);
    }

    #[test]
    fn test_diameter_bounds() {
        let err = parse_prediction_input(&with_field("diameter", json!(0))).unwrap_err();
        assert_eq!(err.fields(), vec!["diameter"]);
        assert_eq!(err.violations[0].code, "range");

        assert!(parse_prediction_input(&with_field("diameter", json!(1000))).is_ok());
        assert!(parse_prediction_input(&with_field("diameter", json!(0.001))).is_ok());
        assert!(parse_prediction_input(&with_field("diameter", json!(1000.01))).is_err());
    }

    #[test]
    fn test_trajectory_angle_bounds() {
        assert!(parse_prediction_input(&with_field("trajectoryAngle", json!(90))).is_ok());
        assert!(parse_prediction_input(&with_field("trajectoryAngle", json!(0))).is_ok());

        let err = parse_prediction_input(&with_field("trajectoryAngle", json!(91))).unwrap_err();
        assert_eq!(err.fields(), vec!["trajectoryAngle"]);
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        let body = json!({
            "diameter": "big",
            "distance": 0,
            "mass": 5.0,
            "trajectoryAngle": 10
        });

        let err = parse_prediction_input(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["diameter", "velocity", "distance"]);
        assert_eq!(err.violations[0].code, "invalid_type");
        assert_eq!(err.violations[1].code, "required");
        assert_eq!(err.violations[2].code, "range");
    }

    #[test]
    fn test_non_object_body() {
        let err = parse_prediction_input(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.violations[0].field.is_none());
        assert!(err.violations[0].message.contains("array"));
    }

    #[test]
    fn test_snake_case_angle_is_not_accepted() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("trajectoryAngle");
        body["trajectory_angle"] = json!(45.0);

        let err = parse_prediction_input(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["trajectoryAngle"]);
    }
}
