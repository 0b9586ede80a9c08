//! Execution requests and reports

use crate::configuration::FileFormat;
use crate::plugin::capability::CapabilityKind;
use crate::receiver::ReceiverStats;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// What to run and with which raw inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    algorithm: String,
    execution_id: String,
    inputs: BTreeMap<String, Vec<String>>,
    file_formats: BTreeMap<String, FileFormat>,
}

impl ExecutionRequest {
    /// New request with a timestamped execution identifier
    pub fn new(algorithm: impl Into<String>) -> Self {
        let algorithm = algorithm.into();
        let execution_id = format!(
            "{}_{}",
            algorithm,
            chrono::Local::now().format("%Y-%m-%d_%H%M%S%3f")
        );
        Self {
            algorithm,
            execution_id,
            inputs: BTreeMap::new(),
            file_formats: BTreeMap::new(),
        }
    }

    pub fn with_execution_id(mut self, execution_id: impl Into<String>) -> Self {
        self.execution_id = execution_id.into();
        self
    }

    /// Raw inputs for one requirement; replaces earlier inputs for it
    pub fn with_input<I, S>(mut self, identifier: impl Into<String>, raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs
            .insert(identifier.into(), raw.into_iter().map(Into::into).collect());
        self
    }

    /// How files given for `identifier` are read; CSV defaults otherwise
    pub fn with_file_format(mut self, identifier: impl Into<String>, format: FileFormat) -> Self {
        self.file_formats.insert(identifier.into(), format);
        self
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }

    pub fn inputs(&self) -> &BTreeMap<String, Vec<String>> {
        &self.inputs
    }

    pub fn file_formats(&self) -> &BTreeMap<String, FileFormat> {
        &self.file_formats
    }

    pub fn file_format(&self, identifier: &str) -> Option<&FileFormat> {
        self.file_formats.get(identifier)
    }

    /// Raw inputs for `identifier`, empty when none were given
    pub fn raw(&self, identifier: &str) -> &[String] {
        self.inputs.get(identifier).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Outcome of one successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionReport {
    pub algorithm: String,
    pub execution_id: String,
    #[serde(with = "millis")]
    pub elapsed: Duration,
    pub values_delivered: usize,
    pub sinks_attached: Vec<CapabilityKind>,
    pub accepted: usize,
    pub rejected: usize,
}

impl ExecutionReport {
    pub(crate) fn new(
        request: &ExecutionRequest,
        elapsed: Duration,
        values_delivered: usize,
        sinks_attached: Vec<CapabilityKind>,
        stats: ReceiverStats,
    ) -> Self {
        Self {
            algorithm: request.algorithm.clone(),
            execution_id: request.execution_id.clone(),
            elapsed,
            values_delivered,
            sinks_attached,
            accepted: stats.accepted,
            rejected: stats.rejected,
        }
    }
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} results accepted, {} rejected in {} ms",
            self.algorithm,
            self.execution_id,
            self.accepted,
            self.rejected,
            self.elapsed.as_millis()
        )
    }
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_id_starts_with_algorithm_name() {
        let request = ExecutionRequest::new("example-fd");
        assert!(request.execution_id().starts_with("example-fd_"));

        let request = request.with_execution_id("run-1");
        assert_eq!(request.execution_id(), "run-1");
    }

    #[test]
    fn test_missing_inputs_are_empty() {
        let request = ExecutionRequest::new("example-fd").with_input("table", ["people"]);

        assert_eq!(request.raw("table"), ["people".to_string()]);
        assert!(request.raw("column").is_empty());
    }

    #[test]
    fn test_file_formats_are_kept_per_identifier() {
        let request = ExecutionRequest::new("example-ucc")
            .with_file_format("input", FileFormat::tsv());

        assert_eq!(request.file_format("input").map(|f| f.separator), Some('\t'));
        assert!(request.file_format("other").is_none());
    }

    #[test]
    fn test_report_serializes_elapsed_as_millis() {
        let request = ExecutionRequest::new("example-fd").with_execution_id("run-1");
        let report = ExecutionReport::new(
            &request,
            Duration::from_millis(1500),
            4,
            vec![CapabilityKind::FunctionalDependency],
            ReceiverStats {
                accepted: 3,
                rejected: 1,
            },
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["elapsed"], 1500);
        assert_eq!(json["sinks_attached"][0], "functional-dependency");
        assert_eq!(
            report.to_string(),
            "example-fd (run-1): 3 results accepted, 1 rejected in 1500 ms"
        );
    }
}
