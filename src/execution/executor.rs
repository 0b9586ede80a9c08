//! Algorithm Executor
//!
//! Runs one algorithm end to end: look up, analyze, instantiate, build and
//! dispatch configuration, attach result sinks, execute, flush. Each run gets
//! its own algorithm instance and receiver; only the registry, the analyzer
//! cache and the connection catalog are shared.

use crate::configuration::{ConfigurationError, ConnectionCatalog, InMemoryConnectionCatalog};
use crate::core::shutdown::CancellationFlag;
use crate::execution::error::{ExecutionError, ExecutionResult};
use crate::execution::request::{ExecutionReport, ExecutionRequest};
use crate::plugin::analyzer::PluginAnalyzer;
use crate::plugin::capability::CapabilityKind;
use crate::plugin::dispatch::{attach_result_sinks, dispatch_configuration, ConfigurationPair};
use crate::plugin::error::{AlgorithmError, PluginError};
use crate::plugin::registry::AlgorithmRegistry;
use crate::plugin::traits::Algorithm;
use crate::receiver::{
    ReceiverError, ReceiverStats, ResultReceiver, ResultStore, SharedReceiver,
};
use futures::future::join_all;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tempfile::TempDir;

/// Receiver of one run, kept concrete so its statistics stay readable
pub type RunReceiver<S> = Arc<Mutex<ResultReceiver<S>>>;

pub struct AlgorithmExecutor {
    registry: Arc<AlgorithmRegistry>,
    analyzer: Arc<PluginAnalyzer>,
    catalog: Arc<dyn ConnectionCatalog>,
    cancellation: CancellationFlag,
}

impl AlgorithmExecutor {
    pub fn new(registry: Arc<AlgorithmRegistry>, analyzer: Arc<PluginAnalyzer>) -> Self {
        Self {
            registry,
            analyzer,
            catalog: Arc::new(InMemoryConnectionCatalog::new()),
            cancellation: CancellationFlag::new(),
        }
    }

    /// Resolve named database connections through `catalog`
    pub fn with_catalog(mut self, catalog: Arc<dyn ConnectionCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Share `cancellation` with every run of this executor
    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    pub fn analyzer(&self) -> &PluginAnalyzer {
        &self.analyzer
    }

    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancellation
    }

    /// Run `request`, sending every result to `receiver`
    pub fn execute<S: ResultStore + 'static>(
        &self,
        request: &ExecutionRequest,
        receiver: &RunReceiver<S>,
    ) -> ExecutionResult<ExecutionReport> {
        let name = request.algorithm();
        let discovered = self.registry.get(name)?;
        let capabilities = self.analyzer.analyze(discovered)?;
        let mut algorithm = discovered
            .instantiate()
            .map_err(|e| PluginError::LoadError {
                plugin_name: name.to_string(),
                cause: e.to_string(),
            })?;

        let pairs = self.configuration_pairs(algorithm.as_ref(), request)?;
        let delivered = dispatch_configuration(
            algorithm.as_mut(),
            name,
            &capabilities,
            &pairs,
            &self.cancellation,
        )?;

        let shared: SharedReceiver = receiver.clone();
        let attached = attach_result_sinks(
            algorithm.as_mut(),
            name,
            &capabilities,
            &shared,
            &self.cancellation,
        )?;

        // dropped at the end of the run, removing the directory
        let _scratch = if capabilities.satisfies(CapabilityKind::TempFile) {
            Some(self.provide_scratch(algorithm.as_mut(), request)?)
        } else {
            None
        };

        let before = lock(receiver).stats();
        log::info!("Running '{}' as {}", name, request.execution_id());
        let started = Instant::now();
        algorithm
            .execute()
            .map_err(|e| Self::execution_failure(name, e))?;
        let elapsed = started.elapsed();

        let mut receiver = lock(receiver);
        receiver.flush()?;
        let after = receiver.stats();
        let stats = ReceiverStats {
            accepted: after.accepted - before.accepted,
            rejected: after.rejected - before.rejected,
        };

        let report = ExecutionReport::new(request, elapsed, delivered, attached, stats);
        log::info!("{}", report);
        Ok(report)
    }

    /// Run independent requests in parallel, one blocking task each. Reports
    /// come back in request order.
    pub async fn execute_all<S: ResultStore + 'static>(
        self: &Arc<Self>,
        runs: Vec<(ExecutionRequest, RunReceiver<S>)>,
    ) -> Vec<ExecutionResult<ExecutionReport>> {
        let tasks: Vec<_> = runs
            .into_iter()
            .map(|(request, receiver)| {
                let executor = Arc::clone(self);
                let algorithm = request.algorithm().to_string();
                let handle =
                    tokio::task::spawn_blocking(move || executor.execute(&request, &receiver));
                async move {
                    handle.await.unwrap_or_else(|e| {
                        Err(ExecutionError::Aborted {
                            algorithm,
                            reason: e.to_string(),
                        })
                    })
                }
            })
            .collect();

        join_all(tasks).await
    }

    /// One value per declared requirement, in declaration order
    fn configuration_pairs(
        &self,
        algorithm: &dyn Algorithm,
        request: &ExecutionRequest,
    ) -> ExecutionResult<Vec<ConfigurationPair>> {
        let requirements = algorithm.configuration_requirements()?;

        if let Some(unknown) = request
            .inputs()
            .keys()
            .chain(request.file_formats().keys())
            .find(|id| !requirements.iter().any(|r| r.identifier() == id.as_str()))
        {
            return Err(ConfigurationError::UnknownRequirement {
                identifier: unknown.clone(),
            }
            .into());
        }

        requirements
            .into_iter()
            .map(|requirement| -> ExecutionResult<ConfigurationPair> {
                let raw = request.raw(requirement.identifier());
                let format = request
                    .file_format(requirement.identifier())
                    .cloned()
                    .unwrap_or_default();
                let value = requirement.build_value_with_format(raw, &*self.catalog, &format)?;
                Ok((requirement, value))
            })
            .collect()
    }

    fn provide_scratch(
        &self,
        algorithm: &mut dyn Algorithm,
        request: &ExecutionRequest,
    ) -> ExecutionResult<TempDir> {
        let scratch = tempfile::Builder::new()
            .prefix(&format!("{}-", request.execution_id()))
            .tempdir()
            .map_err(|source| ExecutionError::Scratch {
                algorithm: request.algorithm().to_string(),
                source,
            })?;

        let target = algorithm
            .as_temp_file()
            .ok_or_else(|| PluginError::MissingCapability {
                plugin_name: request.algorithm().to_string(),
                requirement: "scratch directory".to_string(),
                capability: CapabilityKind::TempFile,
            })?;
        target.set_temp_directory(scratch.path());
        log::debug!("Scratch directory {}", scratch.path().display());
        Ok(scratch)
    }

    fn execution_failure(name: &str, error: AlgorithmError) -> PluginError {
        match error {
            AlgorithmError::Receiver(ReceiverError::Cancelled) => PluginError::Cancelled {
                plugin_name: name.to_string(),
            },
            other => PluginError::ExecutionError {
                plugin_name: name.to_string(),
                operation: "execute".to_string(),
                cause: other.to_string(),
            },
        }
    }
}

fn lock<S: ResultStore>(receiver: &RunReceiver<S>) -> std::sync::MutexGuard<'_, ResultReceiver<S>> {
    receiver.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::builtin::example_fd::{COLUMN_IDENTIFIER, TABLE_IDENTIFIER};
    use crate::plugin::builtin::example_stats::FILES_IDENTIFIER;
    use crate::receiver::{InputSchema, ResultCache, ResultList};
    use crate::results::ResultType;
    use std::fs;

    fn executor() -> Arc<AlgorithmExecutor> {
        Arc::new(AlgorithmExecutor::new(
            Arc::new(AlgorithmRegistry::with_builtins()),
            Arc::new(PluginAnalyzer::new()),
        ))
    }

    fn cache() -> RunReceiver<ResultList> {
        Arc::new(Mutex::new(ResultCache::new()))
    }

    fn fd_request() -> ExecutionRequest {
        ExecutionRequest::new("example-fd")
            .with_input(TABLE_IDENTIFIER, ["people"])
            .with_input(COLUMN_IDENTIFIER, ["column2"])
    }

    #[test]
    fn test_execute_runs_configured_algorithm() {
        let receiver = cache();
        let report = executor().execute(&fd_request(), &receiver).unwrap();

        assert_eq!(report.values_delivered, 4);
        assert_eq!(report.sinks_attached, vec![CapabilityKind::FunctionalDependency]);
        assert_eq!(report.accepted, 1);
        assert_eq!(
            receiver.lock().unwrap().fetch_new_results()[0].to_string(),
            "[people.column1] -> people.column2"
        );
    }

    #[test]
    fn test_unknown_algorithm() {
        let result = executor().execute(&ExecutionRequest::new("tane"), &cache());
        assert!(matches!(
            result,
            Err(ExecutionError::Plugin(PluginError::PluginNotFound { .. }))
        ));
    }

    #[test]
    fn test_unknown_input_identifier() {
        let request = fd_request().with_input("treshold", ["3"]);

        let result = executor().execute(&request, &cache());
        assert!(matches!(
            result,
            Err(ExecutionError::Configuration(
                ConfigurationError::UnknownRequirement { ref identifier }
            )) if identifier == "treshold"
        ));
    }

    #[test]
    fn test_tsv_file_read_with_requested_format() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scores.tsv");
        fs::write(&path, "player\tscore\nann\t3\nbob\t5\n").unwrap();
        let request = ExecutionRequest::new("example-stats")
            .with_input(FILES_IDENTIFIER, [path.display().to_string()])
            .with_file_format(FILES_IDENTIFIER, crate::configuration::FileFormat::tsv());
        let receiver = cache();

        let report = executor().execute(&request, &receiver).unwrap();

        assert_eq!(report.accepted, 2);
        let results: Vec<String> = receiver
            .lock()
            .unwrap()
            .fetch_new_results()
            .iter()
            .map(|result| result.to_string())
            .collect();
        assert_eq!(
            results[1],
            "[scores.tsv.score] Nulls=0 Number of Distinct Values=2 Number of Rows=2"
        );
    }

    #[test]
    fn test_file_format_for_unknown_identifier() {
        let request = fd_request()
            .with_file_format("input", crate::configuration::FileFormat::tsv());

        assert!(matches!(
            executor().execute(&request, &cache()),
            Err(ExecutionError::Configuration(
                ConfigurationError::UnknownRequirement { ref identifier }
            )) if identifier == "input"
        ));
    }

    #[test]
    fn test_rejected_results_are_counted() {
        let receiver = Arc::new(Mutex::new(
            ResultCache::new().with_schema(InputSchema::parse(["people.column2"]).unwrap()),
        ));

        let report = executor().execute(&fd_request(), &receiver).unwrap();
        assert_eq!((report.accepted, report.rejected), (0, 1));
    }

    #[test]
    fn test_cancelled_executor_configures_nothing() {
        let executor = AlgorithmExecutor::new(
            Arc::new(AlgorithmRegistry::with_builtins()),
            Arc::new(PluginAnalyzer::new()),
        );
        executor.cancellation().cancel();

        let result = executor.execute(&fd_request(), &cache());
        assert!(matches!(
            result,
            Err(ExecutionError::Plugin(PluginError::Cancelled { .. }))
        ));
    }

    #[test]
    fn test_scratch_directory_is_removed_after_run() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "name\nAda\nAlan\n").unwrap();
        let request = ExecutionRequest::new("example-stats")
            .with_execution_id("stats-run")
            .with_input(FILES_IDENTIFIER, [path.display().to_string()]);

        let receiver = cache();
        let report = executor().execute(&request, &receiver).unwrap();

        assert_eq!(report.accepted, 1);
        let leftovers = fs::read_dir(std::env::temp_dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("stats-run-"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_parallel_runs_are_isolated() {
        let executor = executor();
        let receivers: Vec<_> = (0..4).map(|_| cache()).collect();
        let runs = receivers
            .iter()
            .enumerate()
            .map(|(i, receiver)| {
                (
                    fd_request().with_execution_id(format!("run-{}", i)),
                    receiver.clone(),
                )
            })
            .collect();

        let reports = executor.execute_all(runs).await;

        for (i, report) in reports.into_iter().enumerate() {
            assert_eq!(report.unwrap().execution_id, format!("run-{}", i));
        }
        for receiver in receivers {
            assert_eq!(
                receiver
                    .lock()
                    .unwrap()
                    .store()
                    .count(ResultType::FunctionalDependency),
                1
            );
        }
    }
}
