//! Unique column combinations, plain and conditional

use crate::receiver::OmniscientResultReceiver;
use crate::results::column::{ColumnCombination, ColumnCondition, ColumnIdentifier};
use crate::results::number::{FiniteDouble, InvalidNumber};
use crate::results::{ResultType, ResultVariant};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueColumnCombination {
    column_combination: ColumnCombination,
}

impl UniqueColumnCombination {
    pub fn new(column_combination: ColumnCombination) -> Self {
        Self { column_combination }
    }

    pub fn column_combination(&self) -> &ColumnCombination {
        &self.column_combination
    }

    pub fn column_identifiers(&self) -> Vec<&ColumnIdentifier> {
        self.column_combination.columns().collect()
    }
}

impl fmt::Display for UniqueColumnCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_combination)
    }
}

impl ResultVariant for UniqueColumnCombination {
    const RESULT_TYPE: ResultType = ResultType::UniqueColumnCombination;

    fn accepted_by(&self, receiver: &dyn OmniscientResultReceiver) -> bool {
        receiver.accepted_unique_column_combination(self)
    }
}

/// Combination that is unique among the rows matching `condition`.
/// `coverage` is the fraction of rows the condition selects, in `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalUniqueColumnCombination {
    column_combination: ColumnCombination,
    condition: ColumnCondition,
    coverage: FiniteDouble,
}

impl ConditionalUniqueColumnCombination {
    pub fn new(
        column_combination: ColumnCombination,
        condition: ColumnCondition,
        coverage: f64,
    ) -> Result<Self, InvalidNumber> {
        if !(0.0..=1.0).contains(&coverage) {
            return Err(InvalidNumber {
                name: "coverage",
                expected: "between 0 and 1",
                value: coverage,
            });
        }
        Ok(Self {
            column_combination,
            condition,
            coverage: FiniteDouble::new(coverage)?,
        })
    }

    pub fn column_combination(&self) -> &ColumnCombination {
        &self.column_combination
    }

    pub fn condition(&self) -> &ColumnCondition {
        &self.condition
    }

    pub fn coverage(&self) -> f64 {
        self.coverage.get()
    }

    /// Combination columns followed by the columns the condition mentions
    pub fn column_identifiers(&self) -> Vec<&ColumnIdentifier> {
        let mut columns: Vec<&ColumnIdentifier> = self.column_combination.columns().collect();
        columns.extend(self.condition.columns());
        columns
    }
}

impl fmt::Display for ConditionalUniqueColumnCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} (coverage {})",
            self.column_combination, self.condition, self.coverage
        )
    }
}

impl ResultVariant for ConditionalUniqueColumnCombination {
    const RESULT_TYPE: ResultType = ResultType::ConditionalUniqueColumnCombination;

    fn accepted_by(&self, receiver: &dyn OmniscientResultReceiver) -> bool {
        receiver.accepted_conditional_unique_column_combination(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ucc_display() {
        let ucc = UniqueColumnCombination::new(ColumnCombination::new(vec![
            ColumnIdentifier::new("people", "ssn"),
        ]));
        assert_eq!(ucc.to_string(), "[people.ssn]");
        assert_eq!(ucc.column_identifiers().len(), 1);
    }

    #[test]
    fn test_cucc_includes_condition_columns() {
        let cucc = ConditionalUniqueColumnCombination::new(
            ColumnCombination::new(vec![ColumnIdentifier::new("people", "name")]),
            ColumnCondition::equals(ColumnIdentifier::new("people", "country"), "NZ"),
            0.25,
        )
        .unwrap();

        let names: Vec<String> = cucc
            .column_identifiers()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(names, vec!["people.name", "people.country"]);
        assert_eq!(
            cucc.to_string(),
            "[people.name] | people.country=NZ (coverage 0.25)"
        );
    }

    #[test]
    fn test_coverage_must_be_a_fraction() {
        let build = |coverage: f64| {
            ConditionalUniqueColumnCombination::new(
                ColumnCombination::new(vec![ColumnIdentifier::new("t", "a")]),
                ColumnCondition::equals(ColumnIdentifier::new("t", "b"), "1"),
                coverage,
            )
        };

        assert!(build(1.0).is_ok());
        for coverage in [f64::NAN, f64::INFINITY, -0.1, 1.5] {
            let error = build(coverage).unwrap_err();
            assert_eq!(error.name, "coverage");
        }
    }
}
