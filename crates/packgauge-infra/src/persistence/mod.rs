//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod file_container_repo;

pub use file_container_repo::FileContainerRepository;
