//! Infrastructure layer - persistence implementations, loaders

pub mod item_csv;
pub mod number_field_loader;
pub mod persistence;
