//! Filter specification parsing and row evaluation.
//!
//! A filter specification is a grid: column A names a field, and every
//! further column is one filter group giving that field's condition.
//!
//! # Cell Syntax
//!
//! - `>=10`, `<2.5`, `=3` - Numeric comparison (`=`, `<`, `<=`, `>`, `>=`)
//! - `BLANK` - The cell must be empty
//! - `IGNORE` - No condition on this field for this group
//! - `Yes,No,-` - The cell must equal one of the listed values
//!
//! All conditions of a group must hold for a row to be counted.
//!
//! # Example
//!
//! ```
//! use csvcount_core::filter::{FilterSetBuilder, TableContext, FilterEvaluator};
//!
//! let grid = vec![
//!     vec!["Count".to_string(), ">=10".to_string()],
//!     vec!["Type".to_string(), "Deletion,Insertion".to_string()],
//! ];
//! let filters = FilterSetBuilder::build(&grid).unwrap();
//! assert_eq!(filters.len(), 1);
//!
//! let header = vec!["Count".to_string(), "Type".to_string()];
//! let context = TableContext::new(&header, true);
//! let evaluator = FilterEvaluator::new(&filters.groups[0], &context);
//!
//! let row = vec!["12".to_string(), "Deletion".to_string()];
//! assert!(evaluator.evaluate(&row).unwrap());
//! ```

mod ast;
mod builder;
mod error;
mod evaluator;
mod parser;

pub use ast::{Condition, FilterGroup, FilterSet, Operator, Predicate};
pub use builder::FilterSetBuilder;
pub use error::{ConditionError, EvalError, SpecError, SpecResult};
pub use evaluator::{evaluate, FilterEvaluator, TableContext};
pub use parser::{CellKind, ConditionParser, BLANK, IGNORE};
