//! Headroom, percentage-used and status flags
//!
//! A maximum `<= 0` means "no headroom", never "unbounded". Percentages are
//! not clamped: a value above 100 is how callers tell "over the limit" apart
//! from "at the limit".

use crate::model::{ContainedItem, Container, ContainerMetrics};
use crate::rounding::{round1, round2};
use crate::service::container_accountant::{
    current_capacity, current_weight, total_weight_with_container,
};

fn remaining(current: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    round2(max - current).max(0.0)
}

fn percentage(current: f64, max: f64) -> f64 {
    if max <= 0.0 || current < 0.0 {
        return 0.0;
    }
    round1(current / max * 100.0)
}

pub fn remaining_weight(current: f64, max_weight: f64) -> f64 {
    remaining(current, max_weight)
}

pub fn remaining_capacity(current: f64, max_capacity: f64) -> f64 {
    remaining(current, max_capacity)
}

pub fn weight_percentage(current: f64, max_weight: f64) -> f64 {
    percentage(current, max_weight)
}

pub fn capacity_percentage(current: f64, max_capacity: f64) -> f64 {
    percentage(current, max_capacity)
}

pub fn is_overweight(current: f64, max_weight: f64) -> bool {
    current > max_weight
}

pub fn is_over_capacity(current: f64, max_capacity: f64) -> bool {
    current > max_capacity
}

/// Metrics for the container as currently stored
pub fn evaluate(container: &Container) -> ContainerMetrics {
    evaluate_contents(container, &container.contents)
}

/// Metrics for `container`'s limits applied to an arbitrary set of contents.
///
/// Used for the would-be state during admission.
pub fn evaluate_contents<'a, I>(container: &Container, contents: I) -> ContainerMetrics
where
    I: IntoIterator<Item = &'a ContainedItem> + Clone,
{
    let weight = current_weight(contents.clone());
    let capacity = current_capacity(contents.clone());
    let total_weight = total_weight_with_container(contents.clone(), container.tare_weight);
    let item_count = contents.into_iter().map(|c| c.quantity).sum();

    let overweight = is_overweight(weight, container.max_weight);
    let over_capacity = is_over_capacity(capacity, container.max_capacity);

    ContainerMetrics {
        current_weight: weight,
        current_capacity: capacity,
        total_weight,
        remaining_weight: remaining_weight(weight, container.max_weight),
        remaining_capacity: remaining_capacity(capacity, container.max_capacity),
        weight_percentage: weight_percentage(weight, container.max_weight),
        capacity_percentage: capacity_percentage(capacity, container.max_capacity),
        is_overweight: overweight,
        is_over_capacity: over_capacity,
        is_full: overweight || over_capacity,
        item_count,
    }
}
