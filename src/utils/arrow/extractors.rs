//! Column extraction utilities for Arrow record batches
//!
//! Role columns are pulled out of a record batch as plain vectors with
//! missing entries represented as `None`.

use arrow::array::{Array, Float64Array, StringArray};
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::arrow::array_utils::{ColumnKind, downcast_array, get_column};

/// Extract a numeric column as `f64` values
///
/// Nulls and floating-point `NaN` are both reported as missing.
///
/// # Errors
///
/// Returns an error if the column is absent or not numeric.
pub fn extract_float64_column(batch: &RecordBatch, column_name: &str) -> Result<Vec<Option<f64>>> {
    let array = get_column(batch, column_name, ColumnKind::Numeric)?;
    let values = downcast_array::<Float64Array>(&array, column_name, "Float64")?;

    Ok(values
        .iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect())
}

/// Extract a categorical column as string labels
///
/// # Errors
///
/// Returns an error if the column is absent or cannot be cast to strings.
pub fn extract_label_column(batch: &RecordBatch, column_name: &str) -> Result<Vec<Option<String>>> {
    let array = get_column(batch, column_name, ColumnKind::Categorical)?;
    let labels = downcast_array::<StringArray>(&array, column_name, "String")?;

    Ok((0..labels.len())
        .map(|row| (!labels.is_null(row)).then(|| labels.value(row).to_string()))
        .collect())
}
