//! Typed findings emitted by algorithms
//!
//! Every variant knows how to deliver itself to an
//! [`OmniscientResultReceiver`], so the host never inspects a result to
//! route it.

pub mod column;
pub mod dependency;
pub mod number;
pub mod statistic;
pub mod uniqueness;

pub use column::{ColumnCombination, ColumnCondition, ColumnIdentifier, ColumnPermutation};
pub use dependency::{
    ComparisonOperator, FunctionalDependency, InclusionDependency, OrderDependency, OrderType,
};
pub use number::{FiniteDouble, InvalidNumber};
pub use statistic::{BasicStatistic, BasicStatisticValue};
pub use uniqueness::{ConditionalUniqueColumnCombination, UniqueColumnCombination};

use crate::receiver::{OmniscientResultReceiver, ReceiverResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Discriminant of [`AnalysisResult`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ResultType {
    FunctionalDependency,
    InclusionDependency,
    UniqueColumnCombination,
    ConditionalUniqueColumnCombination,
    OrderDependency,
    BasicStatistic,
}

impl ResultType {
    /// Suffix of the file a printer writes this type to
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ResultType::FunctionalDependency => "_fds",
            ResultType::InclusionDependency => "_inds",
            ResultType::UniqueColumnCombination => "_uccs",
            ResultType::ConditionalUniqueColumnCombination => "_cuccs",
            ResultType::OrderDependency => "_ods",
            ResultType::BasicStatistic => "_stats",
        }
    }
}

/// Implemented by every result variant so typed sinks can be generic
pub trait ResultVariant: Into<AnalysisResult> + Clone + fmt::Debug + Send + 'static {
    const RESULT_TYPE: ResultType;

    fn accepted_by(&self, receiver: &dyn OmniscientResultReceiver) -> bool;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnalysisResult {
    FunctionalDependency(FunctionalDependency),
    InclusionDependency(InclusionDependency),
    UniqueColumnCombination(UniqueColumnCombination),
    ConditionalUniqueColumnCombination(ConditionalUniqueColumnCombination),
    OrderDependency(OrderDependency),
    BasicStatistic(BasicStatistic),
}

impl AnalysisResult {
    pub fn result_type(&self) -> ResultType {
        match self {
            AnalysisResult::FunctionalDependency(_) => ResultType::FunctionalDependency,
            AnalysisResult::InclusionDependency(_) => ResultType::InclusionDependency,
            AnalysisResult::UniqueColumnCombination(_) => ResultType::UniqueColumnCombination,
            AnalysisResult::ConditionalUniqueColumnCombination(_) => {
                ResultType::ConditionalUniqueColumnCombination
            }
            AnalysisResult::OrderDependency(_) => ResultType::OrderDependency,
            AnalysisResult::BasicStatistic(_) => ResultType::BasicStatistic,
        }
    }

    /// Hand this result to the receiver method for its variant
    pub fn send_result_to(self, receiver: &mut dyn OmniscientResultReceiver) -> ReceiverResult<()> {
        match self {
            AnalysisResult::FunctionalDependency(r) => receiver.receive_functional_dependency(r),
            AnalysisResult::InclusionDependency(r) => receiver.receive_inclusion_dependency(r),
            AnalysisResult::UniqueColumnCombination(r) => {
                receiver.receive_unique_column_combination(r)
            }
            AnalysisResult::ConditionalUniqueColumnCombination(r) => {
                receiver.receive_conditional_unique_column_combination(r)
            }
            AnalysisResult::OrderDependency(r) => receiver.receive_order_dependency(r),
            AnalysisResult::BasicStatistic(r) => receiver.receive_basic_statistic(r),
        }
    }

    pub fn accepted_by(&self, receiver: &dyn OmniscientResultReceiver) -> bool {
        match self {
            AnalysisResult::FunctionalDependency(r) => r.accepted_by(receiver),
            AnalysisResult::InclusionDependency(r) => r.accepted_by(receiver),
            AnalysisResult::UniqueColumnCombination(r) => r.accepted_by(receiver),
            AnalysisResult::ConditionalUniqueColumnCombination(r) => r.accepted_by(receiver),
            AnalysisResult::OrderDependency(r) => r.accepted_by(receiver),
            AnalysisResult::BasicStatistic(r) => r.accepted_by(receiver),
        }
    }

    /// Every column the result references
    pub fn column_identifiers(&self) -> Vec<&ColumnIdentifier> {
        match self {
            AnalysisResult::FunctionalDependency(r) => r.column_identifiers(),
            AnalysisResult::InclusionDependency(r) => r.column_identifiers(),
            AnalysisResult::UniqueColumnCombination(r) => r.column_identifiers(),
            AnalysisResult::ConditionalUniqueColumnCombination(r) => r.column_identifiers(),
            AnalysisResult::OrderDependency(r) => r.column_identifiers(),
            AnalysisResult::BasicStatistic(r) => r.column_identifiers(),
        }
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisResult::FunctionalDependency(r) => write!(f, "{}", r),
            AnalysisResult::InclusionDependency(r) => write!(f, "{}", r),
            AnalysisResult::UniqueColumnCombination(r) => write!(f, "{}", r),
            AnalysisResult::ConditionalUniqueColumnCombination(r) => write!(f, "{}", r),
            AnalysisResult::OrderDependency(r) => write!(f, "{}", r),
            AnalysisResult::BasicStatistic(r) => write!(f, "{}", r),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for AnalysisResult {
                fn from(result: $variant) -> Self {
                    AnalysisResult::$variant(result)
                }
            }
        )*
    };
}

impl_from_variant!(
    FunctionalDependency,
    InclusionDependency,
    UniqueColumnCombination,
    ConditionalUniqueColumnCombination,
    OrderDependency,
    BasicStatistic,
);
