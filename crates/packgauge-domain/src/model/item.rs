//! Packable item type definitions

use packgauge_types::{VolumeUnit, WeightUnit};
use serde::{Deserialize, Serialize};

/// Item as stored in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Per-unit weight in `weight_unit`
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    /// Per-unit volume in `volume_unit`
    pub volume: f64,
    #[serde(default)]
    pub volume_unit: VolumeUnit,
}

/// Snapshot of an item held in a container, used only for aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainedItem {
    pub quantity: u32,
    pub item: Item,
}

impl ContainedItem {
    pub fn new(item: Item, quantity: u32) -> Self {
        Self { quantity, item }
    }
}

/// Stored association between a container and an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLink {
    pub item_id: String,
    pub quantity: u32,
}

impl ContentLink {
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}
