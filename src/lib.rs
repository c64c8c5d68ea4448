//! A Rust library for decomposing income inequality, measured by the squared
//! coefficient of variation, across income sources and population groups.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{DecompositionConfig, GroupOrder};
pub use error::{DecompositionError, Result};

// Decomposition
pub use algorithm::decomposition::{
    ColumnRoles, Decomposer, Decomposition, PopulationStats, SourceStats, decompose,
};

// Arrow types
pub use arrow::record_batch::RecordBatch;
