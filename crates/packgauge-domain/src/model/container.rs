//! Container (bag / suitcase) type definitions

use packgauge_types::Entity;
use serde::{Deserialize, Serialize};

use super::ContainedItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    #[default]
    Bag,
    Suitcase,
}

impl ContainerKind {
    /// Entity used for number field lookups
    pub fn entity(&self) -> Entity {
        match self {
            ContainerKind::Bag => Entity::Bag,
            ContainerKind::Suitcase => Entity::Suitcase,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContainerKind::Bag => "bag",
            ContainerKind::Suitcase => "suitcase",
        }
    }
}

/// Container with its resolved contents.
///
/// Maxima and tare are in canonical units (liters, kilograms).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: ContainerKind,
    /// Declared capacity limit (L)
    pub max_capacity: f64,
    /// Declared weight limit for contents (kg)
    pub max_weight: f64,
    #[serde(default)]
    pub tare_weight: f64,
    #[serde(default)]
    pub contents: Vec<ContainedItem>,
}

impl Container {
    /// Total number of units held
    pub fn item_count(&self) -> u32 {
        self.contents.iter().map(|c| c.quantity).sum()
    }

    /// Quantity of a given item currently held
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.contents
            .iter()
            .filter(|c| c.item.id == item_id)
            .map(|c| c.quantity)
            .sum()
    }
}
