//! Two-way decomposition of income inequality
//!
//! Inequality is measured by half the squared coefficient of variation
//! (SCV). Each income source's share of total SCV is split across the groups
//! of a categorical feature into a within-group and a between-group part.

pub mod contribution;
pub mod decomposer;
pub mod input;
pub mod moments;
pub mod result;

// Re-export commonly used items
pub use contribution::{
    Group, GroupComponents, GroupPartition, PopulationStats, SourceStats, group_components,
};
pub use decomposer::{Decomposer, decompose};
pub use input::{ColumnRoles, GroupKeys, PreparedData};
pub use moments::{normalize_weights, scv, weighted_correlation, weighted_mean, weighted_variance};
pub use result::Decomposition;
