//! Evaluation of filter groups against table rows.
//!
//! # Example
//!
//! ```
//! use csvcount_core::filter::{Condition, FilterEvaluator, FilterGroup, Operator, TableContext};
//!
//! let header = vec!["Type".to_string(), "Count".to_string()];
//! let group = FilterGroup::new(vec![
//!     Condition::one_of("Type", ["Deletion", "Insertion"]),
//!     Condition::compare("Count", Operator::Ge, 10.0),
//! ]);
//!
//! let context = TableContext::new(&header, true);
//! let evaluator = FilterEvaluator::new(&group, &context);
//!
//! let row = vec!["Deletion".to_string(), "15".to_string()];
//! assert!(evaluator.evaluate(&row).unwrap());
//! ```

use strsim::levenshtein;

use super::ast::{Condition, FilterGroup, Operator, Predicate};
use super::error::EvalError;

/// Maximum Levenshtein distance for a header name to be offered as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Per-table state shared by every evaluator run against that table.
#[derive(Debug, Clone)]
pub struct TableContext<'a> {
    header: &'a [String],
    case_sensitive: bool,
}

impl<'a> TableContext<'a> {
    /// Creates a context for a table with the given header row.
    ///
    /// `case_sensitive` only affects OR-set comparisons; field names are
    /// always matched exactly.
    pub fn new(header: &'a [String], case_sensitive: bool) -> Self {
        Self {
            header,
            case_sensitive,
        }
    }

    /// Returns the index of the first header column named `field`.
    pub fn column_index(&self, field: &str) -> Option<usize> {
        self.header.iter().position(|name| name == field)
    }

    /// Resolves `field` to a column, or the error to report for every row.
    fn resolve(&self, field: &str) -> Result<usize, EvalError> {
        self.column_index(field)
            .ok_or_else(|| EvalError::FieldNotFound {
                field: field.to_string(),
                suggestion: find_similar_field(field, self.header),
            })
    }
}

/// Evaluates one filter group against rows of one table.
///
/// Field lookups are resolved once when the evaluator is created, so a group
/// naming a missing field fails the same way for every row.
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    group: &'a FilterGroup,
    context: &'a TableContext<'a>,
    columns: Vec<Result<usize, EvalError>>,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates an evaluator for `group` over the table described by `context`.
    pub fn new(group: &'a FilterGroup, context: &'a TableContext<'a>) -> Self {
        let columns = group
            .conditions
            .iter()
            .map(|condition| context.resolve(&condition.field))
            .collect();
        Self {
            group,
            context,
            columns,
        }
    }

    /// Returns whether `row` satisfies every condition of the group.
    ///
    /// Conditions run in declaration order and evaluation stops at the first
    /// one that does not hold.
    ///
    /// # Errors
    ///
    /// Returns `EvalError::FieldNotFound` when a condition's field is not in
    /// the header, `EvalError::MissingCell` when the row is too short to hold
    /// the field, and `EvalError::NonNumericComparison` when an ordering
    /// comparison meets a non-numeric cell. Numeric equality never fails; a
    /// non-numeric cell just does not match.
    pub fn evaluate(&self, row: &[String]) -> Result<bool, EvalError> {
        for (condition, column) in self.group.conditions.iter().zip(&self.columns) {
            let column = column.clone()?;
            let value = row.get(column).ok_or_else(|| EvalError::MissingCell {
                field: condition.field.clone(),
                column,
            })?;

            if !self.holds(condition, value, column)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn holds(&self, condition: &Condition, value: &str, column: usize) -> Result<bool, EvalError> {
        match &condition.predicate {
            Predicate::OneOf { values } => Ok(self.is_member(value, values)),
            Predicate::Compare { operator, value: operand } => {
                match value.trim().parse::<f64>() {
                    Ok(number) => Ok(operator.compare(number, *operand)),
                    // A non-numeric cell is simply unequal to a number.
                    Err(_) if *operator == Operator::Eq => Ok(false),
                    Err(_) => Err(EvalError::NonNumericComparison {
                        value: value.to_string(),
                        operator: operator.as_str().to_string(),
                        compare_to: operand.to_string(),
                        column,
                    }),
                }
            }
        }
    }

    fn is_member(&self, value: &str, values: &[String]) -> bool {
        if self.context.case_sensitive {
            values.iter().any(|candidate| candidate == value)
        } else {
            let folded = value.to_lowercase();
            values
                .iter()
                .any(|candidate| candidate.to_lowercase() == folded)
        }
    }
}

/// Evaluates `group` against `row` of a table with `header`, comparing
/// strings case-sensitively.
pub fn evaluate(header: &[String], row: &[String], group: &FilterGroup) -> Result<bool, EvalError> {
    let context = TableContext::new(header, true);
    FilterEvaluator::new(group, &context).evaluate(row)
}

/// Finds the header name closest to `field`, if it is a plausible typo.
fn find_similar_field(field: &str, header: &[String]) -> Option<String> {
    let (best_match, best_distance) = header
        .iter()
        .filter(|name| !name.is_empty())
        .map(|name| (name, levenshtein(field, name)))
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match.clone())
    } else {
        None
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
