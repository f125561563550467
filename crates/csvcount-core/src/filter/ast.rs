//! Parsed representation of a filter specification.

use std::fmt;

use serde::Serialize;

/// Comparison operator of a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    /// `=`
    #[serde(rename = "=")]
    Eq,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
}

impl Operator {
    /// Resolves an operator token as written in a filter cell.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "=" => Some(Operator::Eq),
            "<" => Some(Operator::Lt),
            "<=" => Some(Operator::Le),
            ">" => Some(Operator::Gt),
            ">=" => Some(Operator::Ge),
            _ => None,
        }
    }

    /// Returns the operator token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
        }
    }

    /// Applies the operator to two numbers.
    pub fn compare(&self, left: f64, right: f64) -> bool {
        match self {
            Operator::Eq => left == right,
            Operator::Lt => left < right,
            Operator::Le => left <= right,
            Operator::Gt => left > right,
            Operator::Ge => left >= right,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The test a [`Condition`] applies to its field's cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// The cell must equal one of the listed strings (an OR-set).
    /// An empty string matches a blank cell.
    OneOf {
        /// Accepted values, in declaration order.
        values: Vec<String>,
    },

    /// The cell, read as a number, must compare against `value`.
    Compare {
        /// Comparison operator.
        operator: Operator,
        /// Right-hand operand.
        value: f64,
    },
}

/// A single field test within a filter group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    /// Header name of the column the condition reads.
    pub field: String,
    /// Test applied to the column's cell.
    pub predicate: Predicate,
}

impl Condition {
    /// Creates an equality condition over an OR-set of values.
    pub fn one_of<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            predicate: Predicate::OneOf {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Creates a numeric comparison condition.
    pub fn compare(field: impl Into<String>, operator: Operator, value: f64) -> Self {
        Self {
            field: field.into(),
            predicate: Predicate::Compare { operator, value },
        }
    }

    /// Returns the operator of the condition (`=` for OR-sets).
    pub fn operator(&self) -> Operator {
        match &self.predicate {
            Predicate::OneOf { .. } => Operator::Eq,
            Predicate::Compare { operator, .. } => *operator,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.predicate {
            Predicate::OneOf { values } => {
                let shown: Vec<&str> = values
                    .iter()
                    .map(|v| if v.is_empty() { "''" } else { v.as_str() })
                    .collect();
                write!(f, "{} = {}", self.field, shown.join(" OR "))
            }
            Predicate::Compare { operator, value } => {
                write!(f, "{} {} {}", self.field, operator, value)
            }
        }
    }
}

/// An AND-combined list of conditions; one output count column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterGroup {
    /// Conditions in evaluation order.
    pub conditions: Vec<Condition>,
}

impl FilterGroup {
    /// Creates a group from its conditions.
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    /// Returns true if the group has no conditions and so matches every row.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// All filter groups of a specification, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSet {
    /// Groups indexed by their spec column (`groups[0]` is column B).
    pub groups: Vec<FilterGroup>,
}

impl FilterSet {
    /// Number of filter groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if the specification defines no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over the groups in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FilterGroup> {
        self.groups.iter()
    }
}
