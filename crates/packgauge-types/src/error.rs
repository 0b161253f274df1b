//! Error types for packgauge

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::FieldKey;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Invalid field configuration for {key}: {reason}")]
    InvalidField { key: FieldKey, reason: String },
}

/// Rejected input. Never partially applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{message}")]
    EmptyRange { message: String },

    #[error("{message} (min {min} > max {max})")]
    InvertedRange { min: f64, max: f64, message: String },

    #[error("`{field}` is not a finite number")]
    NotFinite { field: String },

    #[error("`{field}` must be a number")]
    NotANumber { field: String },

    #[error("Unknown key `{key}`, expected one of: {expected}")]
    UnknownKey { key: String, expected: String },

    #[error("Expected a JSON object")]
    NotAnObject,

    #[error("{message} ({field} = {value}, allowed {gte}..={lte})")]
    OutOfBounds {
        field: String,
        value: f64,
        gte: f64,
        lte: f64,
        message: String,
    },

    #[error("Quantity must be a positive integer")]
    ZeroQuantity,

    #[error("Nothing to admit")]
    EmptyBatch,

    #[error("Quantity of `{item}` would overflow")]
    QuantityOverflow { item: String },
}

/// Limit a container declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Limit {
    Weight,
    Capacity,
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Limit::Weight => write!(f, "weight"),
            Limit::Capacity => write!(f, "capacity"),
        }
    }
}

/// Admission rejected because a prospective total breaches a declared maximum
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "lowercase")]
pub enum ConstraintViolation {
    #[error("Weight limit exceeded: {prospective:.2} kg would exceed the {max:.2} kg maximum")]
    Weight { prospective: f64, max: f64 },

    #[error("Capacity limit exceeded: {prospective:.2} L would exceed the {max:.2} L maximum")]
    Capacity { prospective: f64, max: f64 },
}

impl ConstraintViolation {
    /// The limit that was breached
    pub fn metric(&self) -> Limit {
        match self {
            ConstraintViolation::Weight { .. } => Limit::Weight,
            ConstraintViolation::Capacity { .. } => Limit::Capacity,
        }
    }

    /// Amount by which the prospective total overshoots the maximum
    pub fn excess(&self) -> f64 {
        match *self {
            ConstraintViolation::Weight { prospective, max }
            | ConstraintViolation::Capacity { prospective, max } => prospective - max,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Admission rejected: {0}")]
    Violation(#[from] ConstraintViolation),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_metric_and_excess() {
        let v = ConstraintViolation::Capacity {
            prospective: 21.0,
            max: 20.0,
        };
        assert_eq!(v.metric(), Limit::Capacity);
        assert!((v.excess() - 1.0).abs() < f64::EPSILON);
        assert!(v.to_string().contains("21.00 L"));
    }

    #[test]
    fn test_violation_serializes_metric_tag() {
        let v = ConstraintViolation::Weight {
            prospective: 23.5,
            max: 23.0,
        };
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["metric"], "weight");
        assert_eq!(json["max"], 23.0);
    }

    #[test]
    fn test_violation_converts_into_error() {
        let err: Error = ConstraintViolation::Weight {
            prospective: 2.0,
            max: 1.0,
        }
        .into();
        assert!(matches!(err, Error::Violation(v) if v.metric() == Limit::Weight));
    }
}
