//! Parser for individual filter cells.

use super::ast::{Condition, Operator};
use super::error::ConditionError;

/// Cell text that matches blank cells.
pub const BLANK: &str = "BLANK";

/// Cell text that contributes no condition.
pub const IGNORE: &str = "IGNORE";

/// What a filter cell means, before it is bound to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum CellKind {
    /// `<operator><number>`, e.g. `>=10` or `<2.5`.
    Compare {
        /// Parsed operator.
        operator: Operator,
        /// Parsed operand.
        value: f64,
    },
    /// The `BLANK` sentinel.
    Blank,
    /// The `IGNORE` sentinel.
    Ignore,
    /// A comma separated OR-set of literal values.
    OneOf(Vec<String>),
}

/// A matcher claims a cell by returning `Some`, or passes with `None`.
type Matcher = fn(&str) -> Option<Result<CellKind, ConditionError>>;

/// Matchers tried in order; the first to claim a cell decides its meaning.
/// A cell no matcher claims is an OR-set.
const MATCHERS: &[Matcher] = &[match_comparison, match_blank, match_ignore];

/// Parser for the cells of a filter specification grid.
///
/// # Grammar
///
/// ```text
/// cell       ::= comparison | "BLANK" | "IGNORE" | list
/// comparison ::= operator number
/// operator   ::= "=" | "<" | "<=" | ">" | ">="
/// list       ::= value ("," value)*
/// ```
///
/// The operator is the longest leading run of `=`, `<` and `>`, so `<=5` is
/// read as `<=` and `=>5` is rejected rather than read as `=`.
///
/// # Example
///
/// ```
/// use csvcount_core::filter::{Condition, ConditionParser, Operator};
///
/// let condition = ConditionParser::parse("Count", ">=10").unwrap();
/// assert_eq!(condition, Some(Condition::compare("Count", Operator::Ge, 10.0)));
///
/// assert_eq!(ConditionParser::parse("COSMIC", "IGNORE").unwrap(), None);
/// ```
pub struct ConditionParser;

impl ConditionParser {
    /// Classifies a cell without binding it to a field.
    ///
    /// # Errors
    ///
    /// Returns `ConditionError::InvalidOperator` for an unsupported operator
    /// prefix and `ConditionError::InvalidValue` when a comparison operand is
    /// not a number.
    pub fn classify(cell: &str) -> Result<CellKind, ConditionError> {
        MATCHERS
            .iter()
            .find_map(|matcher| matcher(cell))
            .unwrap_or_else(|| Ok(CellKind::OneOf(split_list(cell))))
    }

    /// Parses a cell into a condition on `field`.
    ///
    /// Returns `Ok(None)` for the `IGNORE` sentinel.
    pub fn parse(field: &str, cell: &str) -> Result<Option<Condition>, ConditionError> {
        let condition = match Self::classify(cell)? {
            CellKind::Compare { operator, value } => Condition::compare(field, operator, value),
            CellKind::Blank => Condition::one_of(field, [""]),
            CellKind::Ignore => return Ok(None),
            CellKind::OneOf(values) => Condition::one_of(field, values),
        };
        Ok(Some(condition))
    }
}

fn match_comparison(cell: &str) -> Option<Result<CellKind, ConditionError>> {
    let split = cell
        .find(|c| !matches!(c, '=' | '<' | '>'))
        .unwrap_or(cell.len());
    if split == 0 {
        return None;
    }

    let (token, rest) = cell.split_at(split);
    let Some(operator) = Operator::from_token(token) else {
        return Some(Err(ConditionError::invalid_operator(token)));
    };

    let parsed = rest
        .trim()
        .parse::<f64>()
        .map(|value| CellKind::Compare { operator, value })
        .map_err(|_| ConditionError::invalid_value(rest));
    Some(parsed)
}

fn match_blank(cell: &str) -> Option<Result<CellKind, ConditionError>> {
    (cell == BLANK).then_some(Ok(CellKind::Blank))
}

fn match_ignore(cell: &str) -> Option<Result<CellKind, ConditionError>> {
    (cell == IGNORE).then_some(Ok(CellKind::Ignore))
}

fn split_list(cell: &str) -> Vec<String> {
    cell.split(',').map(|piece| piece.trim().to_string()).collect()
}
