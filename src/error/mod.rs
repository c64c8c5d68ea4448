//! Error handling for the decomposition.

use arrow::datatypes::DataType;
use arrow::error::ArrowError;

/// Specialized error type for input resolution and result assembly
#[derive(Debug, thiserror::Error)]
pub enum DecompositionError {
    /// A role column is not present in the record set
    #[error("Column not found: {column}")]
    ColumnNotFound {
        /// Name of the missing column
        column: String,
    },

    /// A role column has a type that cannot serve its role
    #[error("Column '{column}' has data type {actual}, expected {expected}")]
    InvalidDataType {
        /// Name of the offending column
        column: String,
        /// Human-readable description of the accepted types
        expected: String,
        /// Type found in the schema
        actual: DataType,
    },

    /// A retained row carries a zero, negative or infinite weight
    #[error("Invalid weight {value} at row {row}: weights must be strictly positive and finite")]
    InvalidWeight {
        /// Row index in the input record set
        row: usize,
        /// The offending weight
        value: f64,
    },

    /// Every row was dropped for missing values
    #[error("No complete rows remain after dropping rows with missing values")]
    EmptyDataset,

    /// JSON configuration or result (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl DecompositionError {
    /// Build a `ColumnNotFound` error
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Build an `InvalidDataType` error
    pub fn invalid_data_type(
        column: impl Into<String>,
        expected: impl Into<String>,
        actual: &DataType,
    ) -> Self {
        Self::InvalidDataType {
            column: column.into(),
            expected: expected.into(),
            actual: actual.clone(),
        }
    }
}

/// Result type for decomposition operations
pub type Result<T> = std::result::Result<T, DecompositionError>;
