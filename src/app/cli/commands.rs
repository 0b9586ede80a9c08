//! Subcommand handlers
//!
//! Handlers write to caller-supplied writers so they can be driven from
//! tests as well as from `startup`.

use super::args::{Command, InputOverride};
use super::config::{AppConfig, ConfigFileError};
use super::display::{algorithm_table, report_table, requirements_json};
use crate::configuration::ConfigurationError;
use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::execution::{
    AlgorithmExecutor, ExecutionReport, ExecutionRequest, ExecutionResult, RunReceiver,
};
use crate::plugin::api::{CapabilityKind, PluginError};
use crate::receiver::{ReceiverError, ResultCache, ResultList, ResultPrinter, ResultStore};
use prettytable::Table;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigFileError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Receiver(#[from] ReceiverError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cannot write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Cannot serialize output: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{failed} of {total} runs failed")]
    RunsFailed { failed: usize, total: usize },
}

impl ContextualError for CommandError {
    fn is_user_actionable(&self) -> bool {
        match self {
            CommandError::Config(e) => e.is_user_actionable(),
            CommandError::Configuration(e) => e.is_user_actionable(),
            CommandError::Plugin(e) => e.is_user_actionable(),
            CommandError::Receiver(e) => e.is_user_actionable(),
            CommandError::InvalidArgument(_) | CommandError::RunsFailed { .. } => true,
            CommandError::Output(_) | CommandError::Serialization(_) => false,
        }
    }

    fn user_message(&self) -> Option<String> {
        match self {
            CommandError::Config(e) => e.user_message(),
            CommandError::Configuration(e) => e.user_message(),
            CommandError::Plugin(e) => e.user_message(),
            CommandError::Receiver(e) => e.user_message(),
            CommandError::InvalidArgument(_) | CommandError::RunsFailed { .. } => {
                Some(self.to_string())
            }
            CommandError::Output(_) | CommandError::Serialization(_) => None,
        }
    }
}

/// Everything a subcommand needs
pub struct CommandContext {
    pub executor: Arc<AlgorithmExecutor>,
    pub config: AppConfig,
    pub use_color: bool,
}

impl CommandContext {
    pub async fn dispatch(
        &self,
        command: &Command,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<(), CommandError> {
        match command {
            Command::List {
                capabilities,
                file_inputs,
            } => self.list(capabilities, *file_inputs, out),
            Command::Describe { algorithm } => self.describe(algorithm, out),
            Command::Run {
                algorithms,
                results_dir,
                inputs,
            } => {
                self.run(algorithms, results_dir.as_deref(), inputs, out, err)
                    .await
            }
        }
    }

    pub fn list(
        &self,
        capabilities: &[CapabilityKind],
        file_inputs: bool,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let registry = self.executor.registry();
        let analyzer = self.executor.analyzer();
        let listings = if file_inputs {
            registry.algorithms_for_file_inputs(analyzer)
        } else {
            registry.list_algorithms(analyzer, capabilities)
        };

        if listings.is_empty() {
            writeln!(out, "No algorithms match")?;
            return Ok(());
        }
        self.write_table(&algorithm_table(&listings, self.use_color), out)
    }

    pub fn describe(&self, algorithm: &str, out: &mut dyn Write) -> Result<(), CommandError> {
        let discovered = self.executor.registry().get(algorithm)?;
        let instance = discovered.instantiate()?;
        let requirements = instance.configuration_requirements()?;
        writeln!(out, "{}", requirements_json(&discovered.info, &requirements)?)?;
        Ok(())
    }

    /// Run `algorithms` in parallel. Results go to `results_dir` as JSON
    /// lines files, or to `out` one JSON object per line.
    pub async fn run(
        &self,
        algorithms: &[String],
        results_dir: Option<&Path>,
        inputs: &[String],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let mut seen = BTreeSet::new();
        if let Some(duplicate) = algorithms.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(CommandError::InvalidArgument(format!(
                "'{}' is listed more than once",
                duplicate
            )));
        }

        let overrides = inputs
            .iter()
            .map(|raw| InputOverride::parse(raw))
            .collect::<Result<Vec<_>, _>>()
            .map_err(CommandError::InvalidArgument)?;
        let requests: Vec<ExecutionRequest> = algorithms
            .iter()
            .map(|name| self.config.request_for(name, &overrides))
            .collect();

        let results_dir: Option<PathBuf> = results_dir
            .map(Path::to_path_buf)
            .or_else(|| self.config.results_dir.clone());

        let outcomes = match results_dir {
            Some(dir) => {
                let outcomes = self.run_to_files(requests, &dir).await?;
                self.write_table(&report_table(&outcomes, self.use_color), out)?;
                outcomes
            }
            None => {
                let outcomes = self.run_to_stream(requests, out).await?;
                report_table(&outcomes, false).print(err)?;
                outcomes
            }
        };

        let failed = outcomes
            .iter()
            .filter_map(|(algorithm, outcome)| outcome.as_ref().err().map(|e| (algorithm, e)))
            .inspect(|(algorithm, error)| {
                log_error_with_context(*error, &format!("Running '{}'", algorithm))
            })
            .count();
        if failed > 0 {
            return Err(CommandError::RunsFailed {
                failed,
                total: outcomes.len(),
            });
        }
        Ok(())
    }

    async fn run_to_files(
        &self,
        requests: Vec<ExecutionRequest>,
        dir: &Path,
    ) -> Result<Vec<(String, ExecutionResult<ExecutionReport>)>, CommandError> {
        let mut runs = Vec::with_capacity(requests.len());
        for request in requests {
            let mut printer = ResultPrinter::create(dir, request.execution_id())?;
            if let Some(schema) = self.config.schema()? {
                printer = printer.with_schema(schema);
            }
            runs.push((request, Arc::new(Mutex::new(printer))));
        }

        let receivers: Vec<_> = runs.iter().map(|(_, receiver)| receiver.clone()).collect();
        let outcomes = self.execute(runs).await;

        for receiver in receivers {
            let printer = receiver.lock().unwrap_or_else(PoisonError::into_inner);
            for file in printer.store().written_files() {
                log::info!("Wrote {}", file.display());
            }
        }
        Ok(outcomes)
    }

    async fn run_to_stream(
        &self,
        requests: Vec<ExecutionRequest>,
        out: &mut dyn Write,
    ) -> Result<Vec<(String, ExecutionResult<ExecutionReport>)>, CommandError> {
        let schema = self.config.schema()?;
        let runs: Vec<(ExecutionRequest, RunReceiver<ResultList>)> = requests
            .into_iter()
            .map(|request| {
                let cache = match &schema {
                    Some(schema) => ResultCache::new().with_schema(schema.clone()),
                    None => ResultCache::new(),
                };
                (request, Arc::new(Mutex::new(cache)))
            })
            .collect();

        let receivers: Vec<_> = runs.iter().map(|(_, receiver)| receiver.clone()).collect();
        let outcomes = self.execute(runs).await;

        for receiver in receivers {
            let results = receiver
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .fetch_new_results();
            for result in results {
                writeln!(out, "{}", serde_json::to_string(&result)?)?;
            }
        }
        Ok(outcomes)
    }

    async fn execute<S: ResultStore + 'static>(
        &self,
        runs: Vec<(ExecutionRequest, RunReceiver<S>)>,
    ) -> Vec<(String, ExecutionResult<ExecutionReport>)> {
        let names: Vec<String> = runs
            .iter()
            .map(|(request, _)| request.algorithm().to_string())
            .collect();
        let reports = self.executor.execute_all(runs).await;
        names.into_iter().zip(reports).collect()
    }

    fn write_table(&self, table: &Table, out: &mut dyn Write) -> Result<(), CommandError> {
        if self.use_color {
            table.print_tty(true)?;
        } else {
            table.print(out)?;
        }
        Ok(())
    }
}
