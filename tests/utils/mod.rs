use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::record_batch::RecordBatch;
use scv_decomp::Decomposition;
use scv_decomp::utils::test::approx_eq;

/// Numeric column with optional missing values
#[must_use]
pub fn numeric(values: &[Option<f64>]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

/// Numeric column without missing values
#[must_use]
pub fn dense(values: &[f64]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

/// Label column with optional missing values
#[must_use]
pub fn labels(values: &[Option<&str>]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

/// Build a record batch from named columns
pub fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    RecordBatch::try_from_iter(columns).expect("columns form a valid record batch")
}

/// Assert two values are close relative to their magnitude
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        approx_eq(actual, expected, 1e-9),
        "{actual} is not close to {expected}"
    );
}

/// Assert two decompositions have the same labels and close cells
pub fn assert_tables_close(actual: &Decomposition, expected: &Decomposition) {
    assert_eq!(actual.sources(), expected.sources());
    assert_eq!(actual.groups(), expected.groups());
    for source in expected.sources() {
        for group in expected.groups() {
            assert_close(
                actual.within(source, group).unwrap(),
                expected.within(source, group).unwrap(),
            );
            assert_close(
                actual.between(source, group).unwrap(),
                expected.between(source, group).unwrap(),
            );
        }
    }
}
