//! Dependency results: functional, inclusion and order dependencies

use crate::receiver::OmniscientResultReceiver;
use crate::results::column::{ColumnCombination, ColumnIdentifier, ColumnPermutation};
use crate::results::{ResultType, ResultVariant};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter};

/// `determinant -> dependant`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionalDependency {
    determinant: ColumnCombination,
    dependant: ColumnIdentifier,
}

impl FunctionalDependency {
    pub const SEPARATOR: &'static str = "->";

    pub fn new(determinant: ColumnCombination, dependant: ColumnIdentifier) -> Self {
        Self {
            determinant,
            dependant,
        }
    }

    pub fn determinant(&self) -> &ColumnCombination {
        &self.determinant
    }

    pub fn dependant(&self) -> &ColumnIdentifier {
        &self.dependant
    }

    pub fn column_identifiers(&self) -> Vec<&ColumnIdentifier> {
        let mut columns: Vec<&ColumnIdentifier> = self.determinant.columns().collect();
        columns.push(&self.dependant);
        columns
    }
}

impl fmt::Display for FunctionalDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.determinant, Self::SEPARATOR, self.dependant)
    }
}

impl ResultVariant for FunctionalDependency {
    const RESULT_TYPE: ResultType = ResultType::FunctionalDependency;

    fn accepted_by(&self, receiver: &dyn OmniscientResultReceiver) -> bool {
        receiver.accepted_functional_dependency(self)
    }
}

/// `dependant ⊆ referenced`, column by column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InclusionDependency {
    dependant: ColumnPermutation,
    referenced: ColumnPermutation,
}

impl InclusionDependency {
    pub const SEPARATOR: &'static str = "[=";

    pub fn new(dependant: ColumnPermutation, referenced: ColumnPermutation) -> Self {
        Self {
            dependant,
            referenced,
        }
    }

    pub fn dependant(&self) -> &ColumnPermutation {
        &self.dependant
    }

    pub fn referenced(&self) -> &ColumnPermutation {
        &self.referenced
    }

    pub fn column_identifiers(&self) -> Vec<&ColumnIdentifier> {
        self.dependant
            .columns()
            .chain(self.referenced.columns())
            .collect()
    }
}

impl fmt::Display for InclusionDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.dependant, Self::SEPARATOR, self.referenced)
    }
}

impl ResultVariant for InclusionDependency {
    const RESULT_TYPE: ResultType = ResultType::InclusionDependency;

    fn accepted_by(&self, receiver: &dyn OmniscientResultReceiver) -> bool {
        receiver.accepted_inclusion_dependency(self)
    }
}

/// How the two sides of an order dependency are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "lowercase")]
pub enum OrderType {
    Lexicographical,
    Pointwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    Smaller,
    SmallerEqual,
    Equal,
    GreaterEqual,
    Greater,
}

impl ComparisonOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Smaller => "<",
            ComparisonOperator::SmallerEqual => "<=",
            ComparisonOperator::Equal => "=",
            ComparisonOperator::GreaterEqual => ">=",
            ComparisonOperator::Greater => ">",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Ordering `lhs` by the operator also orders `rhs`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDependency {
    lhs: ColumnPermutation,
    rhs: ColumnPermutation,
    order_type: OrderType,
    comparison_operator: ComparisonOperator,
}

impl OrderDependency {
    pub const SEPARATOR: &'static str = "~>";

    pub fn new(
        lhs: ColumnPermutation,
        rhs: ColumnPermutation,
        order_type: OrderType,
        comparison_operator: ComparisonOperator,
    ) -> Self {
        Self {
            lhs,
            rhs,
            order_type,
            comparison_operator,
        }
    }

    /// Lexicographical `<=` dependency, the common case
    pub fn lexicographical(lhs: ColumnPermutation, rhs: ColumnPermutation) -> Self {
        Self::new(
            lhs,
            rhs,
            OrderType::Lexicographical,
            ComparisonOperator::SmallerEqual,
        )
    }

    pub fn lhs(&self) -> &ColumnPermutation {
        &self.lhs
    }

    pub fn rhs(&self) -> &ColumnPermutation {
        &self.rhs
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn comparison_operator(&self) -> ComparisonOperator {
        self.comparison_operator
    }

    pub fn column_identifiers(&self) -> Vec<&ColumnIdentifier> {
        self.lhs.columns().chain(self.rhs.columns()).collect()
    }
}

impl fmt::Display for OrderDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({} {})",
            self.lhs,
            Self::SEPARATOR,
            self.rhs,
            self.order_type,
            self.comparison_operator
        )
    }
}

impl ResultVariant for OrderDependency {
    const RESULT_TYPE: ResultType = ResultType::OrderDependency;

    fn accepted_by(&self, receiver: &dyn OmniscientResultReceiver) -> bool {
        receiver.accepted_order_dependency(self)
    }
}
