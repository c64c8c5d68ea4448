//! Property tests for invariants of the decomposition

use proptest::prelude::*;
use scv_decomp::utils::test::approx_eq;
use scv_decomp::{Decomposer, RecordBatch};

use crate::utils::{batch, dense, labels};

const GROUPS: [&str; 3] = ["a", "b", "c"];

fn income_batch(rows: &[(f64, f64, usize, f64)], weight_scale: f64) -> RecordBatch {
    let wage: Vec<f64> = rows.iter().map(|r| r.0).collect();
    let rent: Vec<f64> = rows.iter().map(|r| r.1).collect();
    let total: Vec<f64> = rows.iter().map(|r| r.0 + r.1).collect();
    let group: Vec<Option<&str>> = rows.iter().map(|r| Some(GROUPS[r.2])).collect();
    let weight: Vec<f64> = rows.iter().map(|r| r.3 * weight_scale).collect();

    batch(vec![
        ("wage", dense(&wage)),
        ("rent", dense(&rent)),
        ("total", dense(&total)),
        ("group", labels(&group)),
        ("weight", dense(&weight)),
    ])
}

fn decomposer() -> Decomposer {
    Decomposer::new("total")
        .with_feature("group")
        .with_sources(["wage", "rent"])
        .with_weights("weight")
}

fn income_rows() -> impl Strategy<Value = Vec<(f64, f64, usize, f64)>> {
    prop::collection::vec(
        (1.0..1_000.0f64, 1.0..500.0f64, 0..GROUPS.len(), 0.1..10.0f64),
        4..40,
    )
}

proptest! {
    #[test]
    fn weight_scaling_does_not_change_results(rows in income_rows(), scale in 0.01..100.0f64) {
        let base = decomposer().decompose(&income_batch(&rows, 1.0)).unwrap();
        let scaled = decomposer().decompose(&income_batch(&rows, scale)).unwrap();

        prop_assert_eq!(base.groups(), scaled.groups());
        for source in base.sources() {
            for group in base.groups() {
                let (a, b) = (base.within(source, group).unwrap(), scaled.within(source, group).unwrap());
                prop_assert!(approx_eq(a, b, 1e-9), "within {} {}: {} vs {}", source, group, a, b);
                let (a, b) = (base.between(source, group).unwrap(), scaled.between(source, group).unwrap());
                prop_assert!(approx_eq(a, b, 1e-9), "between {} {}: {} vs {}", source, group, a, b);
            }
        }
    }

    #[test]
    fn cells_add_up_to_population_scv(rows in income_rows()) {
        let result = decomposer().decompose(&income_batch(&rows, 1.0)).unwrap();
        let scv = result.population().scv;
        prop_assert!(
            approx_eq(result.total(), scv, 1e-8),
            "sum {} vs SCV {}", result.total(), scv
        );
    }

    #[test]
    fn shape_follows_sources_and_groups(rows in income_rows()) {
        let result = decomposer().decompose(&income_batch(&rows, 1.0)).unwrap();
        let distinct = GROUPS.iter().filter(|g| rows.iter().any(|r| GROUPS[r.2] == **g)).count();

        prop_assert_eq!(result.num_rows(), 2);
        prop_assert_eq!(result.groups().len(), distinct);
        prop_assert_eq!(result.to_record_batch().unwrap().num_columns(), 2 * distinct + 1);
    }
}
