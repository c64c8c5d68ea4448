//! Result table assembly
//!
//! One row per income source; for each group `j` two columns `{j}.W` and
//! `{j}.B` holding the within-group and between-group contributions.

use std::fmt;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use serde::Serialize;

use super::contribution::{GroupComponents, PopulationStats, SourceStats};
use crate::error::Result;

/// Name of the leading source-name column
pub const SOURCE_COLUMN: &str = "source";
/// Suffix of within-group columns
pub const WITHIN_SUFFIX: &str = "W";
/// Suffix of between-group columns
pub const BETWEEN_SUFFIX: &str = "B";

/// Two-way decomposition of inequality by income source and feature group
#[derive(Debug, Clone, Serialize)]
pub struct Decomposition {
    sources: Vec<String>,
    groups: Vec<String>,
    population: PopulationStats,
    source_stats: Vec<SourceStats>,
    within: Vec<Vec<f64>>,
    between: Vec<Vec<f64>>,
}

impl Decomposition {
    /// Build the table from per-source rows of group components
    ///
    /// `components[i][j]` belongs to `sources[i]` and `groups[j]`.
    pub(crate) fn assemble(
        groups: Vec<String>,
        population: PopulationStats,
        source_stats: Vec<SourceStats>,
        components: Vec<Vec<GroupComponents>>,
    ) -> Self {
        debug_assert_eq!(source_stats.len(), components.len());
        let sources = source_stats.iter().map(|s| s.name.clone()).collect();
        let (within, between): (Vec<Vec<f64>>, Vec<Vec<f64>>) = components
            .into_iter()
            .map(|row| {
                debug_assert_eq!(row.len(), groups.len());
                let cells: (Vec<f64>, Vec<f64>) =
                    row.into_iter().map(|c| (c.within, c.between)).unzip();
                cells
            })
            .unzip();

        Self {
            sources,
            groups,
            population,
            source_stats,
            within,
            between,
        }
    }

    /// Source names in row order
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Group labels in column order
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Statistics of total income
    #[must_use]
    pub const fn population(&self) -> &PopulationStats {
        &self.population
    }

    /// Population-level statistics per source, in row order
    #[must_use]
    pub fn source_stats(&self) -> &[SourceStats] {
        &self.source_stats
    }

    /// Statistics of the first source with the given name
    #[must_use]
    pub fn source_stat(&self, source: &str) -> Option<&SourceStats> {
        self.source_index(source).map(|i| &self.source_stats[i])
    }

    fn source_index(&self, source: &str) -> Option<usize> {
        self.sources.iter().position(|s| s == source)
    }

    fn cell(&self, table: &[Vec<f64>], source: &str, group: &str) -> Option<f64> {
        let row = self.source_index(source)?;
        let column = self.groups.iter().position(|g| g == group)?;
        Some(table[row][column])
    }

    /// Within-group contribution of `source` in `group`
    #[must_use]
    pub fn within(&self, source: &str, group: &str) -> Option<f64> {
        self.cell(&self.within, source, group)
    }

    /// Between-group contribution of `source` in `group`
    #[must_use]
    pub fn between(&self, source: &str, group: &str) -> Option<f64> {
        self.cell(&self.between, source, group)
    }

    /// Sum of every within and between cell of one source
    ///
    /// Equals the source's `contribution()` up to rounding.
    #[must_use]
    pub fn source_total(&self, source: &str) -> Option<f64> {
        let row = self.source_index(source)?;
        Some(self.within[row].iter().chain(&self.between[row]).sum())
    }

    /// Sum of every cell in the table
    ///
    /// Equals the population SCV when the sources add up to total income.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.within.iter().chain(&self.between).flatten().sum()
    }

    /// Column names: `source`, then `{j}.W`, `{j}.B` per group
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        std::iter::once(SOURCE_COLUMN.to_string())
            .chain(self.groups.iter().flat_map(|group| {
                [
                    format!("{group}.{WITHIN_SUFFIX}"),
                    format!("{group}.{BETWEEN_SUFFIX}"),
                ]
            }))
            .collect()
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        2 * self.groups.len() + 1
    }

    /// Convert the table to an Arrow record batch
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let names = self.column_names();
        let mut fields = Vec::with_capacity(names.len());
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(names.len());

        fields.push(Field::new(SOURCE_COLUMN, DataType::Utf8, false));
        columns.push(Arc::new(StringArray::from(self.sources.clone())));

        for (j, pair) in names[1..].chunks(2).enumerate() {
            for (name, table) in pair.iter().zip([&self.within, &self.between]) {
                fields.push(Field::new(name, DataType::Float64, false));
                columns.push(Arc::new(Float64Array::from_iter_values(
                    table.iter().map(|row| row[j]),
                )));
            }
        }

        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
    }

    /// Serialize the table and its statistics as pretty JSON
    ///
    /// Non-finite values are written as `null`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let batch = self.to_record_batch().map_err(|_| fmt::Error)?;
        let table = pretty_format_batches(&[batch]).map_err(|_| fmt::Error)?;
        writeln!(f, "{table}")?;
        writeln!(
            f,
            "Total income: mean {:.4}, variance {:.4}, SCV {:.6}",
            self.population.mean, self.population.variance, self.population.scv
        )
    }
}
