//! The `Decomposer`: resolves inputs and runs the two-stage computation

use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use log::debug;
use rayon::prelude::*;

use super::contribution::{
    GroupComponents, GroupPartition, PopulationStats, SourceStats, group_components,
};
use super::input::{ColumnRoles, PreparedData};
use super::moments::normalize_weights;
use super::result::Decomposition;
use crate::config::DecompositionConfig;
use crate::error::{DecompositionError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Decomposes income inequality by source and feature group
#[derive(Debug, Clone)]
pub struct Decomposer {
    roles: ColumnRoles,
    config: DecompositionConfig,
}

impl Decomposer {
    /// Create a decomposer for the given total income column
    ///
    /// Without further settings the total is its own single source, all rows
    /// form one group and every row has weight 1.
    #[must_use]
    pub fn new(total: impl Into<String>) -> Self {
        Self {
            roles: ColumnRoles::new(total),
            config: DecompositionConfig::default(),
        }
    }

    /// Create a decomposer from explicit column roles
    #[must_use]
    pub fn from_roles(roles: ColumnRoles) -> Self {
        Self {
            roles,
            config: DecompositionConfig::default(),
        }
    }

    /// Set the categorical column that defines the groups
    #[must_use]
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.roles.feature = Some(feature.into());
        self
    }

    /// Set the income source columns, in result row order
    #[must_use]
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.sources = Some(sources.into_iter().map(Into::into).collect());
        self
    }

    /// Set the weight column
    #[must_use]
    pub fn with_weights(mut self, weights: impl Into<String>) -> Self {
        self.roles.weights = Some(weights.into());
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: DecompositionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn roles(&self) -> &ColumnRoles {
        &self.roles
    }

    #[must_use]
    pub const fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    /// Decompose a single record batch
    ///
    /// # Errors
    ///
    /// Fails before any computation if a role column is missing or mistyped,
    /// if a retained weight is not strictly positive and finite, or if no complete row
    /// remains. Degenerate sources are not errors; their cells are `NaN`.
    pub fn decompose(&self, batch: &RecordBatch) -> Result<Decomposition> {
        let start = Instant::now();
        log_operation_start(
            "Decomposing",
            &format!(
                "'{}' by '{}'",
                self.roles.total,
                self.roles
                    .feature
                    .as_deref()
                    .unwrap_or(&self.config.all_group_label)
            ),
        );

        let data = PreparedData::resolve(batch, &self.roles, &self.config)?;
        let decomposition = self.compute(&data);

        log_operation_complete(
            "decomposed",
            decomposition.num_rows() * decomposition.groups().len(),
            Some(start.elapsed()),
        );
        Ok(decomposition)
    }

    /// Decompose several record batches sharing one schema as one record set
    ///
    /// # Errors
    ///
    /// Returns `EmptyDataset` for an empty slice and an Arrow error if the
    /// batches cannot be concatenated (for example, mismatched schemas). After
    /// concatenation the errors of [`Decomposer::decompose`] apply.
    pub fn decompose_batches(&self, batches: &[RecordBatch]) -> Result<Decomposition> {
        let Some(first) = batches.first() else {
            return Err(DecompositionError::EmptyDataset);
        };
        let combined = concat_batches(&first.schema(), batches)?;
        debug!(
            "Concatenated {} batches into {} rows",
            batches.len(),
            combined.num_rows()
        );
        self.decompose(&combined)
    }

    fn compute(&self, data: &PreparedData) -> Decomposition {
        let overall_weights = normalize_weights(&data.weights);
        let population = PopulationStats::compute(&data.total, &overall_weights);

        // Stage 1: population-level statistics per source
        let source_stats = self.map_sources(data.sources.len(), |i| {
            SourceStats::compute(
                &data.sources[i],
                &data.source_values[i],
                &data.total,
                &overall_weights,
                &population,
            )
        });

        if self.config.warn_on_degenerate {
            for stats in source_stats.iter().filter(|s| s.is_degenerate()) {
                log_warning(
                    &format!(
                        "Source has undefined contribution factor (mean {}, SCV {})",
                        stats.mean, stats.scv
                    ),
                    Some(stats.name.as_str()),
                );
            }
        }

        // Stage 2: within/between split per (source, group)
        let partition = GroupPartition::build(&data.row_groups, data.groups.len(), &data.weights);
        let components: Vec<Vec<GroupComponents>> = self.map_sources(data.sources.len(), |i| {
            partition
                .groups()
                .iter()
                .map(|group| group_components(&source_stats[i], &data.source_values[i], group))
                .collect()
        });

        Decomposition::assemble(
            data.groups.labels().to_vec(),
            population,
            source_stats,
            components,
        )
    }

    fn map_sources<T, F>(&self, count: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send,
    {
        if self.config.parallel {
            (0..count).into_par_iter().map(f).collect()
        } else {
            (0..count).map(f).collect()
        }
    }
}

/// Decompose income inequality of `total` by source and feature group
///
/// # Arguments
/// * `data` - Record set with named columns
/// * `total` - Numeric total income column
/// * `feature` - Categorical column; `None` uses the single group `"all"`
/// * `sources` - Numeric source columns; `None` uses `[total]`
/// * `weights` - Numeric weight column; `None` uses weight 1 per row
pub fn decompose(
    data: &RecordBatch,
    total: &str,
    feature: Option<&str>,
    sources: Option<&[&str]>,
    weights: Option<&str>,
) -> Result<Decomposition> {
    let roles = ColumnRoles {
        total: total.to_string(),
        feature: feature.map(str::to_string),
        sources: sources.map(|names| names.iter().map(|s| (*s).to_string()).collect()),
        weights: weights.map(str::to_string),
    };
    Decomposer::from_roles(roles).decompose(data)
}
