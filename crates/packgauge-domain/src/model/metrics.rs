//! Derived container metrics
//!
//! Metrics are recomputed on every read and after every mutation. Nothing in
//! this module is persisted.

use serde::{Deserialize, Serialize};

/// Weight/capacity figures derived from a container's contents
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerMetrics {
    /// Contents weight (kg), tare excluded
    pub current_weight: f64,
    /// Contents volume (L)
    pub current_capacity: f64,
    /// Contents weight plus tare (kg)
    pub total_weight: f64,
    pub remaining_weight: f64,
    pub remaining_capacity: f64,
    /// May exceed 100
    pub weight_percentage: f64,
    /// May exceed 100
    pub capacity_percentage: f64,
    pub is_overweight: bool,
    pub is_over_capacity: bool,
    pub is_full: bool,
    /// Sum of quantities
    pub item_count: u32,
}

impl ContainerMetrics {
    /// Higher of the two percentages
    pub fn peak_percentage(&self) -> f64 {
        self.weight_percentage.max(self.capacity_percentage)
    }

    pub fn status(&self) -> LoadStatus {
        LoadStatus::classify(self)
    }
}

/// Display classification of a container's load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Nothing packed
    Empty,
    /// Below 90% on both limits
    Available,
    /// 90% or more with headroom left
    NearLimit,
    /// No headroom left on a limit, none exceeded
    AtLimit,
    /// Over a limit
    OverLimit,
}

impl LoadStatus {
    /// "At limit" means no headroom left. It is not read off the rounded
    /// percentage, which shows 100.0 while a few grams still fit.
    pub fn classify(metrics: &ContainerMetrics) -> Self {
        if metrics.is_full {
            return LoadStatus::OverLimit;
        }
        if metrics.item_count == 0 {
            return LoadStatus::Empty;
        }
        if metrics.remaining_weight <= 0.0 || metrics.remaining_capacity <= 0.0 {
            return LoadStatus::AtLimit;
        }
        if metrics.peak_percentage() < 90.0 {
            LoadStatus::Available
        } else {
            LoadStatus::NearLimit
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadStatus::Empty => "empty",
            LoadStatus::Available => "available",
            LoadStatus::NearLimit => "near limit",
            LoadStatus::AtLimit => "at limit",
            LoadStatus::OverLimit => "over limit",
        }
    }
}
