//! Constraint engine services

pub mod admission_controller;
pub mod constraint_evaluator;
pub mod container_accountant;
pub mod range_filter;
pub mod unit_converter;

pub use admission_controller::{can_admit, can_admit_with, Admission, AdmissionRule};
pub use constraint_evaluator::{
    capacity_percentage, evaluate, evaluate_contents, remaining_capacity, remaining_weight,
    weight_percentage,
};
pub use container_accountant::{current_capacity, current_weight, total_weight_with_container};
pub use range_filter::{RangeEvent, RangeFilterState, RangeFilterValidator};
pub use unit_converter::{convert_volume, convert_weight};
