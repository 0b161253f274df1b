//! Per-(entity, metric) numeric field configuration
//!
//! The table is built once and handed around by reference. Both the range
//! filter validator and the strict model checks read bounds from it, so a
//! field's domain is defined in exactly one place.

use std::collections::HashMap;

use packgauge_types::{ConfigError, Entity, FieldKey, Metric, ValidationError};
use serde::{Deserialize, Serialize};

use crate::rounding::round_to;

/// Most decimals an f64 can round to meaningfully
pub const MAX_DECIMALS: u32 = 15;

/// User-facing text for each validation failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMessages {
    /// Both bounds missing
    pub required: String,
    /// min > max
    pub min_gt_max: String,
    /// Strict check outside [gte, lte]
    pub out_of_range: String,
}

impl Default for FieldMessages {
    fn default() -> Self {
        Self {
            required: "Enter a minimum or a maximum".to_string(),
            min_gt_max: "Minimum must not be greater than maximum".to_string(),
            out_of_range: "Value is outside the allowed range".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberFieldConfig {
    pub gte: f64,
    pub lte: f64,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default)]
    pub messages: FieldMessages,
}

impl NumberFieldConfig {
    pub fn new(gte: f64, lte: f64, decimals: u32) -> Self {
        Self {
            gte,
            lte,
            decimals,
            messages: FieldMessages::default(),
        }
    }

    /// Check `gte <= lte`, that both bounds are finite and that `decimals`
    /// is at most `MAX_DECIMALS`
    pub fn validate(&self) -> Result<(), String> {
        if !self.gte.is_finite() || !self.lte.is_finite() {
            return Err("bounds must be finite".to_string());
        }
        if self.decimals > MAX_DECIMALS {
            return Err(format!(
                "decimals ({}) must be at most {}",
                self.decimals, MAX_DECIMALS
            ));
        }
        if self.gte > self.lte {
            return Err(format!("gte ({}) is greater than lte ({})", self.gte, self.lte));
        }
        Ok(())
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.gte, self.lte)
    }

    pub fn round(&self, value: f64) -> f64 {
        round_to(value, self.decimals)
    }

    /// Clamp into the domain, then round
    pub fn normalize(&self, value: f64) -> f64 {
        self.round(self.clamp(value))
    }

    /// Strict check: out-of-domain values are rejected instead of clamped
    pub fn check(&self, field: &str, value: f64) -> Result<f64, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                field: field.to_string(),
            });
        }
        if value < self.gte || value > self.lte {
            return Err(ValidationError::OutOfBounds {
                field: field.to_string(),
                value,
                gte: self.gte,
                lte: self.lte,
                message: self.messages.out_of_range.clone(),
            });
        }
        Ok(self.round(value))
    }
}

/// Read-only (entity, metric) → config mapping
#[derive(Debug, Clone, Default)]
pub struct NumberFieldTable {
    fields: HashMap<FieldKey, NumberFieldConfig>,
}

impl NumberFieldTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in bounds for every field the engine knows about
    pub fn builtin() -> Self {
        use Entity::*;
        use Metric::*;

        let entries = [
            (Item, Weight, 0.0, 100.0, 3),
            (Item, Volume, 0.0, 200.0, 3),
            (Item, Quantity, 1.0, 999.0, 0),
            (Bag, Weight, 0.0, 50.0, 2),
            (Bag, Volume, 0.0, 100.0, 2),
            (Bag, MaxWeight, 0.0, 50.0, 1),
            (Bag, MaxCapacity, 0.0, 100.0, 1),
            (Bag, TareWeight, 0.0, 10.0, 2),
            (Suitcase, Weight, 0.0, 50.0, 2),
            (Suitcase, Volume, 0.0, 200.0, 2),
            (Suitcase, MaxWeight, 0.0, 50.0, 1),
            (Suitcase, MaxCapacity, 0.0, 200.0, 1),
            (Suitcase, TareWeight, 0.0, 15.0, 2),
        ];

        let fields = entries
            .into_iter()
            .map(|(entity, metric, gte, lte, decimals)| {
                (
                    FieldKey::new(entity, metric),
                    NumberFieldConfig::new(gte, lte, decimals),
                )
            })
            .collect();

        Self { fields }
    }

    /// Insert or replace a config, rejecting one that violates `gte <= lte`
    pub fn insert(&mut self, key: FieldKey, config: NumberFieldConfig) -> Result<(), ConfigError> {
        config
            .validate()
            .map_err(|reason| ConfigError::InvalidField { key, reason })?;
        self.fields.insert(key, config);
        Ok(())
    }

    pub fn get(&self, key: FieldKey) -> Option<&NumberFieldConfig> {
        self.fields.get(&key)
    }

    pub fn lookup(&self, entity: Entity, metric: Metric) -> Option<&NumberFieldConfig> {
        self.get(FieldKey::new(entity, metric))
    }

    /// All keys in a stable order
    pub fn keys(&self) -> Vec<FieldKey> {
        let mut keys: Vec<_> = self.fields.keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Optional range boundaries.
///
/// A missing `NumberRangeValue` means the filter is inactive. A present value
/// with neither bound is rejected by the validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberRangeValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumberRangeValue {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether `value` falls inside the present bounds
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}
