//! (entity, metric) keys for numeric fields

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Kind of record a numeric field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Item,
    Bag,
    Suitcase,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Item => "item",
            Entity::Bag => "bag",
            Entity::Suitcase => "suitcase",
        }
    }
}

/// Numeric field of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Weight,
    Volume,
    MaxWeight,
    MaxCapacity,
    TareWeight,
    Quantity,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Volume => "volume",
            Metric::MaxWeight => "max_weight",
            Metric::MaxCapacity => "max_capacity",
            Metric::TareWeight => "tare_weight",
            Metric::Quantity => "quantity",
        }
    }
}

/// Lookup key into the number field table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldKey {
    pub entity: Entity,
    pub metric: Metric,
}

impl FieldKey {
    pub const fn new(entity: Entity, metric: Metric) -> Self {
        Self { entity, metric }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.entity.as_str(), self.metric.as_str())
    }
}
