//! Error types for filter parsing and row evaluation.

use thiserror::Error;

/// A specialized Result type for building a filter set.
pub type SpecResult<T> = Result<T, SpecError>;

/// Why a single filter cell could not be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConditionError {
    /// The operator prefix is not one of `=`, `<`, `<=`, `>`, `>=`.
    #[error("filter operator must be one of =, <, <=, > or >= (found '{operator}')")]
    InvalidOperator {
        /// The operator token as written.
        operator: String,
    },

    /// The operand of a comparison is not a number.
    #[error("value must be numeric (found '{value}')")]
    InvalidValue {
        /// The operand as written.
        value: String,
    },
}

impl ConditionError {
    /// Creates an invalid operator error.
    pub fn invalid_operator(operator: impl Into<String>) -> Self {
        ConditionError::InvalidOperator {
            operator: operator.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(value: impl Into<String>) -> Self {
        ConditionError::InvalidValue {
            value: value.into(),
        }
    }
}

/// A malformed cell in the filter specification, with its location.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid filter in cell {cell}: {condition} ({kind})")]
pub struct SpecError {
    /// Spreadsheet-style reference of the offending cell.
    pub cell: String,
    /// The raw cell text.
    pub condition: String,
    /// What is wrong with it.
    #[source]
    pub kind: ConditionError,
}

/// Why a row could not be evaluated against a filter group.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvalError {
    /// The table header has no column with the condition's field name.
    #[error("Field \"{field}\" not found{}", suggestion_suffix(.suggestion))]
    FieldNotFound {
        /// Field name the condition asked for.
        field: String,
        /// Closest header name, when one is near enough to be a likely typo.
        suggestion: Option<String>,
    },

    /// The header has the field but this row stops before its column.
    #[error("Field \"{field}\" missing from row")]
    MissingCell {
        /// Field name the condition asked for.
        field: String,
        /// Zero-indexed column of the field.
        column: usize,
    },

    /// An ordering comparison met a value that is not a number.
    #[error(
        "Invalid data - greater/less than queries can only be performed on numeric data \
         ({value} {operator} {compare_to})"
    )]
    NonNumericComparison {
        /// The cell value.
        value: String,
        /// Operator token of the condition.
        operator: String,
        /// Operand the cell was compared against.
        compare_to: String,
        /// Zero-indexed column of the cell.
        column: usize,
    },
}

impl EvalError {
    /// Zero-indexed column the error points at, if it has one.
    pub fn column(&self) -> Option<usize> {
        match self {
            EvalError::FieldNotFound { .. } => None,
            EvalError::MissingCell { column, .. }
            | EvalError::NonNumericComparison { column, .. } => Some(*column),
        }
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean \"{name}\"?)"),
        None => String::new(),
    }
}
