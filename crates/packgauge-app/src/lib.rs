//! Application service layer - packing use cases, config, repository wiring

pub mod app;
pub mod config;
pub mod repository;
