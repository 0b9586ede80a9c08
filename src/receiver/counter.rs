//! Store that only counts results per type

use crate::receiver::base::{ResultReceiver, ResultStore};
use crate::receiver::error::ReceiverResult;
use crate::results::{AnalysisResult, ResultType};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultTally {
    counts: BTreeMap<ResultType, usize>,
}

impl ResultTally {
    pub fn count(&self, result_type: ResultType) -> usize {
        self.counts.get(&result_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Non-zero counts in result type order
    pub fn counts(&self) -> impl Iterator<Item = (ResultType, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }
}

impl ResultStore for ResultTally {
    fn store(&mut self, result: AnalysisResult) -> ReceiverResult<()> {
        *self.counts.entry(result.result_type()).or_insert(0) += 1;
        Ok(())
    }
}

pub type ResultCounter = ResultReceiver<ResultTally>;

impl ResultReceiver<ResultTally> {
    pub fn new() -> Self {
        Self::with_store(ResultTally::default())
    }
}

impl Default for ResultReceiver<ResultTally> {
    fn default() -> Self {
        Self::new()
    }
}
