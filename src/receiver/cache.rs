//! In-memory result store

use crate::receiver::base::{ResultReceiver, ResultStore};
use crate::receiver::error::ReceiverResult;
use crate::results::{AnalysisResult, ResultType};

/// Accepted results in arrival order
#[derive(Debug, Default)]
pub struct ResultList {
    results: Vec<AnalysisResult>,
}

impl ResultList {
    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn count(&self, result_type: ResultType) -> usize {
        self.results
            .iter()
            .filter(|result| result.result_type() == result_type)
            .count()
    }

    /// Drain everything received so far
    pub fn take(&mut self) -> Vec<AnalysisResult> {
        std::mem::take(&mut self.results)
    }
}

impl ResultStore for ResultList {
    fn store(&mut self, result: AnalysisResult) -> ReceiverResult<()> {
        self.results.push(result);
        Ok(())
    }
}

pub type ResultCache = ResultReceiver<ResultList>;

impl ResultReceiver<ResultList> {
    pub fn new() -> Self {
        Self::with_store(ResultList::default())
    }

    /// Drain the cached results
    pub fn fetch_new_results(&mut self) -> Vec<AnalysisResult> {
        self.store_mut().take()
    }
}

impl Default for ResultReceiver<ResultList> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receiver::OmniscientResultReceiver;
    use crate::results::{ColumnCombination, ColumnIdentifier, UniqueColumnCombination};

    #[test]
    fn test_fetch_drains_cache() {
        let mut cache = ResultCache::new();
        let ucc = UniqueColumnCombination::new(ColumnCombination::new(vec![ColumnIdentifier::new(
            "t", "id",
        )]));

        cache.receive_unique_column_combination(ucc.clone()).unwrap();
        cache.receive_unique_column_combination(ucc).unwrap();

        assert_eq!(cache.fetch_new_results().len(), 2);
        assert!(cache.fetch_new_results().is_empty());
        assert_eq!(cache.stats().accepted, 2);
    }
}
