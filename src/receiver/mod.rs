//! Result receivers
//!
//! Algorithms never see a concrete receiver. Each result calls the
//! `receive_*` method for its own variant (see
//! [`AnalysisResult::send_result_to`](crate::results::AnalysisResult::send_result_to)),
//! and the receiver checks the referenced columns against the input schema
//! before storing anything.

pub mod base;
pub mod cache;
pub mod counter;
pub mod error;
pub mod printer;
pub mod schema;
pub mod sink;

pub use base::{ReceiverStats, ResultReceiver, ResultStore};
pub use cache::{ResultCache, ResultList};
pub use counter::{ResultCounter, ResultTally};
pub use error::{ReceiverError, ReceiverResult};
pub use printer::{JsonLinesWriter, ResultPrinter};
pub use schema::InputSchema;
pub use sink::{
    BasicStatisticSink, ConditionalUniqueColumnCombinationSink, FunctionalDependencySink,
    InclusionDependencySink, OrderDependencySink, SharedReceiver, TypedSink,
    UniqueColumnCombinationSink,
};

use crate::results::{
    BasicStatistic, ConditionalUniqueColumnCombination, FunctionalDependency, InclusionDependency,
    OrderDependency, UniqueColumnCombination,
};

/// Receives every result variant
///
/// `accepted_*` must not have side effects. `receive_*` fails with
/// [`ReceiverError::ColumnNameMismatch`] when the matching `accepted_*` would
/// return false.
pub trait OmniscientResultReceiver: Send {
    fn receive_functional_dependency(&mut self, result: FunctionalDependency)
        -> ReceiverResult<()>;

    fn receive_inclusion_dependency(&mut self, result: InclusionDependency) -> ReceiverResult<()>;

    fn receive_unique_column_combination(
        &mut self,
        result: UniqueColumnCombination,
    ) -> ReceiverResult<()>;

    fn receive_conditional_unique_column_combination(
        &mut self,
        result: ConditionalUniqueColumnCombination,
    ) -> ReceiverResult<()>;

    fn receive_order_dependency(&mut self, result: OrderDependency) -> ReceiverResult<()>;

    fn receive_basic_statistic(&mut self, result: BasicStatistic) -> ReceiverResult<()>;

    fn accepted_functional_dependency(&self, result: &FunctionalDependency) -> bool;

    fn accepted_inclusion_dependency(&self, result: &InclusionDependency) -> bool;

    fn accepted_unique_column_combination(&self, result: &UniqueColumnCombination) -> bool;

    fn accepted_conditional_unique_column_combination(
        &self,
        result: &ConditionalUniqueColumnCombination,
    ) -> bool;

    fn accepted_order_dependency(&self, result: &OrderDependency) -> bool;

    fn accepted_basic_statistic(&self, result: &BasicStatistic) -> bool;
}
