//! Counting rows of input tables that match each filter group.
//!
//! The analysis reads every input table, evaluates every filter group against
//! every data row, and collects one count per (table, group) pair. Rows that
//! cannot be evaluated are recorded in the error log and are not counted; they
//! never stop the run. Only files that cannot be read are fatal.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cell_ref::cell_reference;
use crate::codec::{self, CodecError};
use crate::filter::{FilterEvaluator, FilterSet, FilterSetBuilder, SpecError, TableContext};
use crate::table::{format_id, InputTable, Table};

/// A specialized Result type for analysis runs.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Fatal errors that stop an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// An input or filter file could not be read.
    #[error(transparent)]
    Source(#[from] CodecError),

    /// The filter specification holds a malformed cell.
    #[error(transparent)]
    Spec(#[from] SpecError),
}

/// Settings that change how rows are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Compare OR-set values case-sensitively.
    pub case_sensitive: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

/// Per-group match counts for one input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    /// Source number of the table.
    pub id: u32,
    /// Label of the table.
    pub label: String,
    /// Matching row count for each filter group, in group order.
    pub counts: Vec<u64>,
}

/// A row that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    /// Label of the table holding the row.
    pub label: String,
    /// Cell reference within the table, when the error points at a column.
    pub cell: Option<String>,
    /// Description of the failure.
    pub message: String,
}

/// Outcome of an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Number of filter groups evaluated.
    pub filter_count: usize,
    /// One row per input table, in input order.
    pub results: Vec<ResultRow>,
    /// Every row-level failure, in the order encountered.
    pub errors: Vec<ErrorEntry>,
}

impl AnalysisReport {
    /// Renders the results table: a `Num, File, Filter 1, ...` header followed
    /// by one row per input table.
    pub fn results_grid(&self) -> Vec<Vec<String>> {
        let mut header = vec!["Num".to_string(), "File".to_string()];
        header.extend((1..=self.filter_count).map(|n| format!("Filter {n}")));

        let mut grid = Vec::with_capacity(self.results.len() + 1);
        grid.push(header);
        for result in &self.results {
            let mut row = vec![format_id(result.id), result.label.clone()];
            row.extend(result.counts.iter().map(u64::to_string));
            grid.push(row);
        }
        grid
    }

    /// Renders the error log: `label, cell, message` rows without a header.
    pub fn errors_grid(&self) -> Vec<Vec<String>> {
        self.errors
            .iter()
            .map(|entry| {
                vec![
                    entry.label.clone(),
                    entry.cell.clone().unwrap_or_default(),
                    entry.message.clone(),
                ]
            })
            .collect()
    }

    /// Writes the results table and the error log, replacing both files.
    pub fn write(&self, results_path: &Path, errors_path: &Path) -> AnalysisResult<()> {
        codec::write_grid(results_path, self.results_grid())?;
        codec::write_grid(errors_path, self.errors_grid())?;
        Ok(())
    }
}

/// Reads and parses the filter specification at `path`.
///
/// # Errors
///
/// Returns `AnalysisError::Source` if the file cannot be read and
/// `AnalysisError::Spec` for the first malformed cell.
pub fn load_filters(path: &Path) -> AnalysisResult<FilterSet> {
    let grid = codec::read_grid(path)?;
    let filters = FilterSetBuilder::build(&grid)?;
    info!(path = %path.display(), groups = filters.len(), "loaded filters");
    Ok(filters)
}

/// Counts the rows of `table` matching each group of `filters`.
///
/// Returns the counts in group order together with an entry for every row
/// that failed to evaluate. Error cells are numbered as in the source file,
/// with the header on row 1. Empty rows are skipped without an error.
pub fn count_table(
    label: &str,
    table: &Table,
    filters: &FilterSet,
    options: &AnalysisOptions,
) -> (Vec<u64>, Vec<ErrorEntry>) {
    let context = TableContext::new(&table.header, options.case_sensitive);
    let mut counts = Vec::with_capacity(filters.len());
    let mut errors = Vec::new();

    for group in filters.iter() {
        let evaluator = FilterEvaluator::new(group, &context);
        let mut count = 0;

        for (row_index, row) in table.rows.iter().enumerate() {
            // Blank line in the source.
            if row.is_empty() {
                continue;
            }
            match evaluator.evaluate(row) {
                Ok(true) => count += 1,
                Ok(false) => {}
                Err(e) => {
                    let cell = e.column().map(|column| cell_reference(column, row_index + 2));
                    debug!(label, cell = cell.as_deref().unwrap_or(""), error = %e, "row not evaluated");
                    errors.push(ErrorEntry {
                        label: label.to_string(),
                        cell,
                        message: e.to_string(),
                    });
                }
            }
        }
        counts.push(count);
    }

    (counts, errors)
}

/// Runs every filter group against every input table.
///
/// Tables are read and counted one at a time, in the order given.
///
/// # Errors
///
/// Returns `AnalysisError::Source` if an input table cannot be read. No
/// partial report is returned in that case.
pub fn run(
    inputs: &[InputTable],
    filters: &FilterSet,
    options: &AnalysisOptions,
) -> AnalysisResult<AnalysisReport> {
    let mut report = AnalysisReport {
        filter_count: filters.len(),
        ..AnalysisReport::default()
    };

    for input in inputs {
        let table = Table::from_grid(codec::read_grid(&input.path)?);
        debug!(label = %input.label, rows = table.len(), "analysing table");

        let (counts, errors) = count_table(&input.label, &table, filters, options);
        if !errors.is_empty() {
            warn!(label = %input.label, errors = errors.len(), "rows could not be evaluated");
        }

        report.results.push(ResultRow {
            id: input.id,
            label: input.label.clone(),
            counts,
        });
        report.errors.extend(errors);
    }

    info!(
        tables = report.results.len(),
        filters = report.filter_count,
        errors = report.errors.len(),
        "analysis complete"
    );
    Ok(report)
}
