//! Arrow data handling utilities
//!
//! This module contains utilities for working with Arrow arrays and record
//! batches: role-aware column lookup, type casting and value extraction.

pub mod array_utils;
pub mod extractors;

// Re-export commonly used functions for convenience
pub use array_utils::{ColumnKind, downcast_array, get_column, get_column_index};
pub use extractors::{extract_float64_column, extract_label_column};
