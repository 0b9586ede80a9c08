//! Column references used by every result variant

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A single `(table, column)` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnIdentifier {
    #[serde(rename = "tableIdentifier")]
    table: String,
    #[serde(rename = "columnIdentifier")]
    column: String,
}

impl ColumnIdentifier {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl fmt::Display for ColumnIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Parses `table.column`. Tables may contain dots (`planets.csv.name`), so the
/// split happens at the last one.
impl FromStr for ColumnIdentifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().rsplit_once('.') {
            Some((table, column)) if !table.is_empty() && !column.is_empty() => {
                Ok(Self::new(table, column))
            }
            _ => Err(format!(
                "'{}' is not a column reference, expected 'table.column'",
                s
            )),
        }
    }
}

/// An unordered set of columns (determinants, unique combinations)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnCombination {
    #[serde(rename = "columnIdentifiers")]
    columns: BTreeSet<ColumnIdentifier>,
}

impl ColumnCombination {
    pub fn new(columns: impl IntoIterator<Item = ColumnIdentifier>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnIdentifier> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &ColumnIdentifier) -> bool {
        self.columns.contains(column)
    }
}

impl FromIterator<ColumnIdentifier> for ColumnCombination {
    fn from_iter<I: IntoIterator<Item = ColumnIdentifier>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for ColumnCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_column_list(f, self.columns.iter())
    }
}

/// An ordered list of columns (inclusion and order dependencies)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnPermutation {
    #[serde(rename = "columnIdentifiers")]
    columns: Vec<ColumnIdentifier>,
}

impl ColumnPermutation {
    pub fn new(columns: impl IntoIterator<Item = ColumnIdentifier>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnIdentifier> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<ColumnIdentifier> for ColumnPermutation {
    fn from_iter<I: IntoIterator<Item = ColumnIdentifier>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for ColumnPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_column_list(f, self.columns.iter())
    }
}

fn write_column_list<'a>(
    f: &mut fmt::Formatter<'_>,
    columns: impl Iterator<Item = &'a ColumnIdentifier>,
) -> fmt::Result {
    write!(f, "[")?;
    for (index, column) in columns.enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", column)?;
    }
    write!(f, "]")
}

/// Condition under which a conditional unique column combination holds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColumnCondition {
    Value {
        column: ColumnIdentifier,
        value: String,
        #[serde(default)]
        negated: bool,
    },
    And {
        conditions: Vec<ColumnCondition>,
    },
    Or {
        conditions: Vec<ColumnCondition>,
    },
}

impl ColumnCondition {
    pub fn equals(column: ColumnIdentifier, value: impl Into<String>) -> Self {
        ColumnCondition::Value {
            column,
            value: value.into(),
            negated: false,
        }
    }

    pub fn not_equals(column: ColumnIdentifier, value: impl Into<String>) -> Self {
        ColumnCondition::Value {
            column,
            value: value.into(),
            negated: true,
        }
    }

    /// Every column this condition mentions, in depth-first order
    pub fn columns(&self) -> Vec<&ColumnIdentifier> {
        let mut found = Vec::new();
        self.collect_columns(&mut found);
        found
    }

    fn collect_columns<'a>(&'a self, found: &mut Vec<&'a ColumnIdentifier>) {
        match self {
            ColumnCondition::Value { column, .. } => found.push(column),
            ColumnCondition::And { conditions } | ColumnCondition::Or { conditions } => {
                for condition in conditions {
                    condition.collect_columns(found);
                }
            }
        }
    }
}

impl fmt::Display for ColumnCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (conditions, joiner) = match self {
            ColumnCondition::Value {
                column,
                value,
                negated,
            } => {
                let operator = if *negated { "!=" } else { "=" };
                return write!(f, "{}{}{}", column, operator, value);
            }
            ColumnCondition::And { conditions } => (conditions, " AND "),
            ColumnCondition::Or { conditions } => (conditions, " OR "),
        };

        write!(f, "(")?;
        for (index, condition) in conditions.iter().enumerate() {
            if index > 0 {
                write!(f, "{}", joiner)?;
            }
            write!(f, "{}", condition)?;
        }
        write!(f, ")")
    }
}
