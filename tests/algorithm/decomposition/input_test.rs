//! Tests for role resolution against differently typed columns

use std::sync::Arc;

use arrow::array::{ArrayRef, DictionaryArray, Int32Array, Int64Array, UInt16Array};
use arrow::datatypes::Int8Type;
use scv_decomp::algorithm::decomposition::{ColumnRoles, PreparedData};
use scv_decomp::{DecompositionConfig, DecompositionError, GroupOrder, decompose};

use crate::utils::{assert_tables_close, batch, dense, labels};

#[test]
fn test_integer_columns_match_float_columns() {
    let ints = batch(vec![
        ("total", Arc::new(Int64Array::from(vec![100, 250, 75, 400])) as ArrayRef),
        ("w", Arc::new(UInt16Array::from(vec![1, 3, 2, 1])) as ArrayRef),
        ("region", Arc::new(Int32Array::from(vec![2, 1, 2, 1])) as ArrayRef),
    ]);
    let floats = batch(vec![
        ("total", dense(&[100.0, 250.0, 75.0, 400.0])),
        ("w", dense(&[1.0, 3.0, 2.0, 1.0])),
        ("region", labels(&[Some("2"), Some("1"), Some("2"), Some("1")])),
    ]);

    let actual = decompose(&ints, "total", Some("region"), None, Some("w")).unwrap();
    let expected = decompose(&floats, "total", Some("region"), None, Some("w")).unwrap();
    assert_eq!(actual.groups(), &["2".to_string(), "1".to_string()]);
    assert_tables_close(&actual, &expected);
}

#[test]
fn test_dictionary_feature() {
    let regions: DictionaryArray<Int8Type> =
        vec!["east", "west", "east", "west", "north"].into_iter().collect();
    let data = batch(vec![
        ("total", dense(&[10.0, 20.0, 30.0, 40.0, 50.0])),
        ("region", Arc::new(regions) as ArrayRef),
    ]);
    let roles = ColumnRoles {
        feature: Some("region".to_string()),
        ..ColumnRoles::new("total")
    };
    let config = DecompositionConfig {
        group_order: GroupOrder::Sorted,
        ..Default::default()
    };

    let prepared = PreparedData::resolve(&data, &roles, &config).unwrap();
    assert_eq!(
        prepared.groups.labels(),
        &["east", "north", "west"].map(str::to_string)
    );
    assert_eq!(prepared.row_groups, vec![0, 2, 0, 2, 1]);
}

#[test]
fn test_string_total_is_rejected() {
    let data = batch(vec![("total", labels(&[Some("1"), Some("2")]))]);
    let err = decompose(&data, "total", None, None, None).unwrap_err();
    assert!(matches!(err, DecompositionError::InvalidDataType { column, .. } if column == "total"));
}

#[test]
fn test_explicit_empty_source_list() {
    let data = batch(vec![("total", dense(&[1.0, 2.0, 3.0]))]);
    let result = decompose(&data, "total", None, Some(&[][..]), None).unwrap();

    assert_eq!(result.num_rows(), 0);
    assert_eq!(result.num_columns(), 3);
    assert_eq!(result.to_record_batch().unwrap().num_rows(), 0);
}
