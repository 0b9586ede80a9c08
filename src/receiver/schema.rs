//! Columns present in the analyzed input

use crate::results::ColumnIdentifier;
use std::collections::BTreeSet;

/// Read-only set of `(table, column)` pairs a receiver validates against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSchema {
    columns: BTreeSet<ColumnIdentifier>,
}

impl InputSchema {
    pub fn new(columns: impl IntoIterator<Item = ColumnIdentifier>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    /// Build a schema from `table.column` strings
    pub fn parse<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = names
            .into_iter()
            .map(|name| name.as_ref().parse::<ColumnIdentifier>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { columns })
    }

    pub fn contains(&self, column: &ColumnIdentifier) -> bool {
        self.columns.contains(column)
    }

    /// Columns from `referenced` that the schema does not know
    pub fn missing<'a>(&self, referenced: &[&'a ColumnIdentifier]) -> Vec<&'a ColumnIdentifier> {
        referenced
            .iter()
            .copied()
            .filter(|column| !self.contains(column))
            .collect()
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
