//! SCV contribution computation
//!
//! The decomposition runs in two stages. Population-level statistics are
//! computed once per income source (`SourceStats`); the within/between split
//! for a (source, group) pair is then a pure function of those statistics and
//! the group's rows (`group_components`). Groups are partitioned once per
//! call and shared across sources.
//!
//! No guard is placed on degenerate sources: a zero mean or zero variance
//! yields `NaN` or infinite values that propagate into every cell of that
//! source.

use serde::Serialize;

use super::moments::{scv, weighted_correlation, weighted_mean, weighted_variance_about};

/// Weighted mean, variance and SCV of one income series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopulationStats {
    pub mean: f64,
    pub variance: f64,
    pub scv: f64,
}

impl PopulationStats {
    /// Compute the moments of `values` under (normalized) `weights`
    #[must_use]
    pub fn compute(values: &[f64], weights: &[f64]) -> Self {
        let mean = weighted_mean(values, weights);
        let variance = weighted_variance_about(values, weights, mean);
        Self {
            mean,
            variance,
            scv: scv(mean, variance),
        }
    }
}

/// Population-level statistics of one income source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceStats {
    /// Source column name
    pub name: String,
    /// Weighted mean of the source
    pub mean: f64,
    /// Weighted population variance of the source
    pub variance: f64,
    /// `variance / (2 * mean^2)` of the source
    pub scv: f64,
    /// Weighted correlation between the source and total income
    pub correlation: f64,
    /// Contribution factor of the source to total SCV
    pub alpha: f64,
}

impl SourceStats {
    /// Compute a source's statistics against total income
    ///
    /// # Arguments
    /// * `name` - Source column name
    /// * `values` - Source income per row
    /// * `total_values` - Total income per row
    /// * `weights` - Overall weights, normalized to sum to one
    /// * `total` - Statistics of total income under the same weights
    #[must_use]
    pub fn compute(
        name: &str,
        values: &[f64],
        total_values: &[f64],
        weights: &[f64],
        total: &PopulationStats,
    ) -> Self {
        let PopulationStats {
            mean,
            variance,
            scv,
        } = PopulationStats::compute(values, weights);
        let correlation = weighted_correlation(values, total_values, weights);
        let alpha = correlation * (mean / total.mean) * (total.scv * scv).sqrt() / scv;

        Self {
            name: name.to_string(),
            mean,
            variance,
            scv,
            correlation,
            alpha,
        }
    }

    /// The source's share of total SCV, `alpha * scv`
    ///
    /// Summed over sources that add up to total income this equals the
    /// population SCV.
    #[must_use]
    pub fn contribution(&self) -> f64 {
        self.alpha * self.scv
    }

    /// Whether the contribution factor is undefined or infinite
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.alpha.is_finite()
    }
}

/// Rows of one feature group together with its weights
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Indices of the group's rows in the prepared data
    pub rows: Vec<usize>,
    /// Group weights normalized to sum to one within the group
    pub weights: Vec<f64>,
    /// Group weight mass relative to the total weight mass
    pub population_share: f64,
}

/// Disjoint groups covering every prepared row
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPartition {
    groups: Vec<Group>,
}

impl GroupPartition {
    /// Split rows into groups by their group index
    ///
    /// # Arguments
    /// * `row_groups` - Group index per row
    /// * `group_count` - Number of distinct groups
    /// * `raw_weights` - Unnormalized weight per row
    #[must_use]
    pub fn build(row_groups: &[usize], group_count: usize, raw_weights: &[f64]) -> Self {
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); group_count];
        for (row, &group) in row_groups.iter().enumerate() {
            members[group].push(row);
        }

        let weight_total: f64 = raw_weights.iter().sum();
        let groups = members
            .into_iter()
            .map(|rows| {
                let group_weights: Vec<f64> = rows.iter().map(|&row| raw_weights[row]).collect();
                let group_total: f64 = group_weights.iter().sum();
                Group {
                    weights: group_weights.iter().map(|w| w / group_total).collect(),
                    population_share: group_total / weight_total,
                    rows,
                }
            })
            .collect();

        Self { groups }
    }

    /// Groups in column order
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }
}

/// Within-group and between-group contribution of one (source, group) cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupComponents {
    pub within: f64,
    pub between: f64,
}

/// Split a source's contribution for one group
///
/// With `m` and `v` the group's weighted mean and variance of the source,
/// `r = (m / source.mean)^2` and `p` the group's population share:
///
/// * within  = `alpha * p * r * v / (2 * m^2)`
/// * between = `alpha * p * (r - 1) / 2`
#[must_use]
pub fn group_components(source: &SourceStats, values: &[f64], group: &Group) -> GroupComponents {
    let group_values: Vec<f64> = group.rows.iter().map(|&row| values[row]).collect();
    let mean = weighted_mean(&group_values, &group.weights);
    let variance = weighted_variance_about(&group_values, &group.weights, mean);
    let relative_mean = (mean / source.mean).powi(2);

    GroupComponents {
        within: source.alpha * group.population_share * relative_mean * variance
            / (2.0 * mean * mean),
        between: source.alpha * 0.5 * group.population_share * (relative_mean - 1.0),
    }
}
