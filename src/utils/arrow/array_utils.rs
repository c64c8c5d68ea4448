//! Utilities for working with Arrow arrays.
//!
//! This module provides utility functions for safely extracting columns from
//! record batches, casting them to the type a role requires.

use arrow::array::{Array, ArrayRef};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{DecompositionError, Result};

/// Kind of value a role column must yield after casting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Any integer, float or decimal column, read as `Float64`
    Numeric,
    /// Any column castable to `Utf8`, read as labels
    Categorical,
}

impl ColumnKind {
    /// The Arrow type the column is cast to
    #[must_use]
    pub const fn target_type(self) -> DataType {
        match self {
            Self::Numeric => DataType::Float64,
            Self::Categorical => DataType::Utf8,
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Numeric => "a numeric type",
            Self::Categorical => "a type castable to Utf8",
        }
    }

    fn accepts(self, data_type: &DataType) -> bool {
        match self {
            Self::Numeric => data_type.is_numeric(),
            Self::Categorical => can_cast_types(data_type, &DataType::Utf8),
        }
    }
}

/// Get the column index by name from a record batch
///
/// # Errors
/// Returns an error if the column does not exist
pub fn get_column_index(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(column_name)
        .map_err(|_| DecompositionError::column_not_found(column_name))
}

/// Get a column from a record batch, cast to the type its kind requires
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `kind` - Whether the column is read as numbers or as labels
///
/// # Returns
///
/// * `Ok(ArrayRef)` - The column array, converted if necessary
/// * `Err` - If the column is missing or its type cannot serve the role
pub fn get_column(batch: &RecordBatch, column_name: &str, kind: ColumnKind) -> Result<ArrayRef> {
    let idx = get_column_index(batch, column_name)?;
    let column = batch.column(idx);
    let actual_type = column.data_type();
    let expected_type = kind.target_type();

    if *actual_type == expected_type {
        return Ok(column.clone());
    }

    if !kind.accepts(actual_type) {
        return Err(DecompositionError::invalid_data_type(
            column_name,
            kind.description(),
            actual_type,
        ));
    }

    debug!("Casting column '{column_name}' from {actual_type:?} to {expected_type:?}");
    Ok(cast(column, &expected_type)?)
}

/// Downcast a column to a specific array type with clear error messages
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        DecompositionError::invalid_data_type(column_name, expected_type_name, array.data_type())
    })
}
