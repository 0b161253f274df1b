//! Domain model types

pub mod container;
pub mod item;
pub mod metrics;
pub mod number_field;

pub use container::{Container, ContainerKind};
pub use item::{ContainedItem, ContentLink, Item};
pub use metrics::{ContainerMetrics, LoadStatus};
pub use number_field::{
    FieldMessages, NumberFieldConfig, NumberFieldTable, NumberRangeValue, MAX_DECIMALS,
};
