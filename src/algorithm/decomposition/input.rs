//! Input resolution and validation
//!
//! Turns a record set plus column roles into the cleaned, aligned vectors the
//! decomposition runs on: defaults are filled in, incomplete rows dropped,
//! weights checked and the distinct groups enumerated once.

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashMap;

use crate::config::{DecompositionConfig, GroupOrder};
use crate::error::{DecompositionError, Result};
use crate::utils::arrow::{extract_float64_column, extract_label_column};
use crate::utils::logging::log_warning;

/// Column roles selected by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoles {
    /// Total income column
    pub total: String,
    /// Categorical feature column; `None` puts every row in one group
    pub feature: Option<String>,
    /// Income source columns; `None` means the total alone
    pub sources: Option<Vec<String>>,
    /// Weight column; `None` means weight 1 for every row
    pub weights: Option<String>,
}

impl ColumnRoles {
    /// Roles with only the total income column set
    #[must_use]
    pub fn new(total: impl Into<String>) -> Self {
        Self {
            total: total.into(),
            feature: None,
            sources: None,
            weights: None,
        }
    }

    /// Source columns after defaulting
    #[must_use]
    pub fn source_names(&self) -> Vec<String> {
        self.sources
            .clone()
            .unwrap_or_else(|| vec![self.total.clone()])
    }
}

/// The ordered set of distinct feature values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupKeys {
    labels: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl GroupKeys {
    /// Enumerate the distinct labels of a sequence in the requested order
    pub fn from_labels<'a, I>(labels: I, order: GroupOrder) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct = labels.into_iter().unique();
        let labels: Vec<String> = match order {
            GroupOrder::Encounter => distinct.map(str::to_string).collect(),
            GroupOrder::Sorted => distinct.sorted().map(str::to_string).collect(),
        };
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();

        Self { labels, index }
    }

    /// Labels in column order
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Position of a label in column order
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Cleaned and aligned role columns, one entry per retained row
#[derive(Debug, Clone)]
pub struct PreparedData {
    /// Source names in result row order
    pub sources: Vec<String>,
    /// Total income per row
    pub total: Vec<f64>,
    /// Income per source, each aligned with `total`
    pub source_values: Vec<Vec<f64>>,
    /// Raw (unnormalized) weight per row
    pub weights: Vec<f64>,
    /// Group index per row into `groups`
    pub row_groups: Vec<usize>,
    /// Distinct groups
    pub groups: GroupKeys,
    /// Number of input rows dropped for missing values
    pub dropped_rows: usize,
}

impl PreparedData {
    /// Resolve roles against a record batch
    ///
    /// Rows with a missing value in any role column are dropped. Among the
    /// retained rows every weight must be strictly positive and finite; an
    /// infinite weight would turn every normalized weight into `NaN`.
    ///
    /// # Errors
    ///
    /// Returns an error if a role column is missing or has an unusable type,
    /// if a retained weight is not positive and finite, or if no row is complete.
    pub fn resolve(
        batch: &RecordBatch,
        roles: &ColumnRoles,
        config: &DecompositionConfig,
    ) -> Result<Self> {
        let sources = roles.source_names();

        let total_column = extract_float64_column(batch, &roles.total)?;
        let source_columns = sources
            .iter()
            .map(|name| extract_float64_column(batch, name))
            .collect::<Result<Vec<_>>>()?;
        let feature_column = roles
            .feature
            .as_deref()
            .map(|name| extract_label_column(batch, name))
            .transpose()?;
        let weight_column = roles
            .weights
            .as_deref()
            .map(|name| extract_float64_column(batch, name))
            .transpose()?;

        let mut total = Vec::with_capacity(batch.num_rows());
        let mut source_values = vec![Vec::with_capacity(batch.num_rows()); sources.len()];
        let mut weights = Vec::with_capacity(batch.num_rows());
        let mut labels: Vec<&str> = Vec::with_capacity(batch.num_rows());
        let mut dropped_rows = 0;

        for row in 0..batch.num_rows() {
            let Some(total_value) = total_column[row] else {
                dropped_rows += 1;
                continue;
            };
            let Some(row_sources) = source_columns
                .iter()
                .map(|column| column[row])
                .collect::<Option<Vec<f64>>>()
            else {
                dropped_rows += 1;
                continue;
            };
            let label = match &feature_column {
                Some(column) => match column[row].as_deref() {
                    Some(label) => label,
                    None => {
                        dropped_rows += 1;
                        continue;
                    }
                },
                None => config.all_group_label.as_str(),
            };
            let weight = match &weight_column {
                Some(column) => match column[row] {
                    Some(weight) => weight,
                    None => {
                        dropped_rows += 1;
                        continue;
                    }
                },
                None => 1.0,
            };

            if weight <= 0.0 || weight.is_infinite() {
                return Err(DecompositionError::InvalidWeight { row, value: weight });
            }

            total.push(total_value);
            for (values, value) in source_values.iter_mut().zip(row_sources) {
                values.push(value);
            }
            weights.push(weight);
            labels.push(label);
        }

        if dropped_rows > 0 {
            log_warning(
                &format!("Dropped {dropped_rows} rows with missing values"),
                None,
            );
        }
        if total.is_empty() {
            return Err(DecompositionError::EmptyDataset);
        }

        let groups = GroupKeys::from_labels(labels.iter().copied(), config.group_order);
        let row_groups = labels
            .iter()
            .filter_map(|label| groups.index_of(label))
            .collect();

        debug!(
            "Resolved {} rows, {} sources, {} groups",
            total.len(),
            sources.len(),
            groups.len()
        );

        Ok(Self {
            sources,
            total,
            source_values,
            weights,
            row_groups,
            groups,
            dropped_rows,
        })
    }

    /// Number of retained rows
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.total.len()
    }
}
