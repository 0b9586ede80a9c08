//! Schema-checking receiver shared by every back end

use crate::receiver::error::{ReceiverError, ReceiverResult};
use crate::receiver::schema::InputSchema;
use crate::receiver::OmniscientResultReceiver;
use crate::results::{
    AnalysisResult, BasicStatistic, ColumnIdentifier, ConditionalUniqueColumnCombination,
    FunctionalDependency, InclusionDependency, OrderDependency, UniqueColumnCombination,
};

/// Where accepted results end up
pub trait ResultStore: Send {
    fn store(&mut self, result: AnalysisResult) -> ReceiverResult<()>;

    /// Push buffered output to its destination
    fn flush(&mut self) -> ReceiverResult<()> {
        Ok(())
    }
}

/// Accepted and rejected result counts for one receiver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiverStats {
    pub accepted: usize,
    pub rejected: usize,
}

/// Receiver that validates columns against an optional [`InputSchema`] and
/// hands accepted results to its store. Without a schema every result is
/// accepted.
#[derive(Debug)]
pub struct ResultReceiver<S: ResultStore> {
    schema: Option<InputSchema>,
    store: S,
    stats: ReceiverStats,
}

impl<S: ResultStore> ResultReceiver<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            schema: None,
            store,
            stats: ReceiverStats::default(),
        }
    }

    /// Restrict accepted results to columns in `schema`
    pub fn with_schema(mut self, schema: InputSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn schema(&self) -> Option<&InputSchema> {
        self.schema.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn stats(&self) -> ReceiverStats {
        self.stats
    }

    pub fn flush(&mut self) -> ReceiverResult<()> {
        self.store.flush()
    }

    fn accepts(&self, columns: &[&ColumnIdentifier]) -> bool {
        match &self.schema {
            None => true,
            Some(schema) => columns.iter().all(|column| schema.contains(column)),
        }
    }

    fn receive(&mut self, result: AnalysisResult) -> ReceiverResult<()> {
        if let Some(schema) = &self.schema {
            let missing = schema.missing(&result.column_identifiers());
            if !missing.is_empty() {
                self.stats.rejected += 1;
                let columns: Vec<String> = missing.iter().map(|c| c.to_string()).collect();
                return Err(ReceiverError::ColumnNameMismatch {
                    result: result.to_string(),
                    columns: columns.join(", "),
                });
            }
        }

        self.store.store(result)?;
        self.stats.accepted += 1;
        Ok(())
    }
}

impl<S: ResultStore> OmniscientResultReceiver for ResultReceiver<S> {
    fn receive_functional_dependency(
        &mut self,
        result: FunctionalDependency,
    ) -> ReceiverResult<()> {
        self.receive(result.into())
    }

    fn receive_inclusion_dependency(&mut self, result: InclusionDependency) -> ReceiverResult<()> {
        self.receive(result.into())
    }

    fn receive_unique_column_combination(
        &mut self,
        result: UniqueColumnCombination,
    ) -> ReceiverResult<()> {
        self.receive(result.into())
    }

    fn receive_conditional_unique_column_combination(
        &mut self,
        result: ConditionalUniqueColumnCombination,
    ) -> ReceiverResult<()> {
        self.receive(result.into())
    }

    fn receive_order_dependency(&mut self, result: OrderDependency) -> ReceiverResult<()> {
        self.receive(result.into())
    }

    fn receive_basic_statistic(&mut self, result: BasicStatistic) -> ReceiverResult<()> {
        self.receive(result.into())
    }

    fn accepted_functional_dependency(&self, result: &FunctionalDependency) -> bool {
        self.accepts(&result.column_identifiers())
    }

    fn accepted_inclusion_dependency(&self, result: &InclusionDependency) -> bool {
        self.accepts(&result.column_identifiers())
    }

    fn accepted_unique_column_combination(&self, result: &UniqueColumnCombination) -> bool {
        self.accepts(&result.column_identifiers())
    }

    fn accepted_conditional_unique_column_combination(
        &self,
        result: &ConditionalUniqueColumnCombination,
    ) -> bool {
        self.accepts(&result.column_identifiers())
    }

    fn accepted_order_dependency(&self, result: &OrderDependency) -> bool {
        self.accepts(&result.column_identifiers())
    }

    fn accepted_basic_statistic(&self, result: &BasicStatistic) -> bool {
        self.accepts(&result.column_identifiers())
    }
}
