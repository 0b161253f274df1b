//! Domain layer: packing models, the capacity/weight constraint engine, and
//! the persistence seam it reads through.

pub mod model;
pub mod repository;
pub mod rounding;
pub mod service;
