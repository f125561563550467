//! Assembles filter groups from a filter specification grid.

use tracing::debug;

use super::ast::{FilterGroup, FilterSet};
use super::error::{SpecError, SpecResult};
use super::parser::ConditionParser;
use crate::cell_ref::cell_reference;

/// Builds a [`FilterSet`] from a filter specification grid.
///
/// The grid has no header row. Column A of each row names a field and every
/// further column holds that field's condition for one filter group, so
/// column B feeds group 1, column C feeds group 2, and so on. Conditions
/// keep row order within a group.
///
/// ```text
///       A          B        C
///  1  Count      >=10     >=100
///  2  dbSNP      BLANK    IGNORE
///  3  Type       "Deletion,MNV"   MNV
/// ```
pub struct FilterSetBuilder;

impl FilterSetBuilder {
    /// Parses every cell of `grid` into filter groups.
    ///
    /// # Errors
    ///
    /// Stops at the first malformed cell, scanning row by row, and returns a
    /// [`SpecError`] naming that cell (`B2`, `C7`, ...) and its text.
    pub fn build(grid: &[Vec<String>]) -> SpecResult<FilterSet> {
        let mut groups: Vec<FilterGroup> = Vec::new();

        for (row_index, row) in grid.iter().enumerate() {
            let Some((field, cells)) = row.split_first() else {
                continue;
            };

            for (offset, cell) in cells.iter().enumerate() {
                if groups.len() <= offset {
                    groups.push(FilterGroup::default());
                }

                let condition =
                    ConditionParser::parse(field, cell).map_err(|kind| SpecError {
                        cell: cell_reference(offset + 1, row_index + 1),
                        condition: cell.clone(),
                        kind,
                    })?;

                if let Some(condition) = condition {
                    groups[offset].conditions.push(condition);
                }
            }
        }

        debug!(groups = groups.len(), "built filter set");
        Ok(FilterSet { groups })
    }
}
