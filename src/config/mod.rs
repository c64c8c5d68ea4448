//! Configuration for the `Decomposer`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Label used for the synthetic group when no feature column is given
pub const DEFAULT_ALL_GROUP_LABEL: &str = "all";

/// Order in which distinct feature values become result columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    /// First appearance among the retained rows
    #[default]
    Encounter,
    /// Lexicographic order of the labels
    Sorted,
}

/// Configuration for the `Decomposer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionConfig {
    /// Column order of the distinct groups
    pub group_order: GroupOrder,
    /// Label of the single synthetic group used when no feature is given
    pub all_group_label: String,
    /// Evaluate income sources on the rayon thread pool
    pub parallel: bool,
    /// Log a warning when a source has a non-finite contribution factor
    pub warn_on_degenerate: bool,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            group_order: GroupOrder::Encounter,
            all_group_label: DEFAULT_ALL_GROUP_LABEL.to_string(),
            parallel: true,
            warn_on_degenerate: true,
        }
    }
}

impl DecompositionConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for DecompositionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Decomposition Configuration:")?;
        writeln!(f, "  Group Order: {:?}", self.group_order)?;
        writeln!(f, "  All-Group Label: {}", self.all_group_label)?;
        writeln!(f, "  Parallel: {}", self.parallel)?;
        writeln!(f, "  Warn On Degenerate: {}", self.warn_on_degenerate)?;
        Ok(())
    }
}
