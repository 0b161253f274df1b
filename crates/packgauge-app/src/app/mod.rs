//! Use cases

pub mod packing_service;

pub use packing_service::{ContainerReport, NewContainer, NewItem, PackingService};
