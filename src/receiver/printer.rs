//! JSON lines writer, one file per execution and result type

use crate::receiver::base::{ResultReceiver, ResultStore};
use crate::receiver::error::{ReceiverError, ReceiverResult};
use crate::results::{AnalysisResult, ResultType};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes `<directory>/<execution id><suffix>`, e.g. `run-1_fds`. Files are
/// opened lazily so types without results leave no file behind.
#[derive(Debug)]
pub struct JsonLinesWriter {
    directory: PathBuf,
    execution_id: String,
    writers: HashMap<ResultType, BufWriter<File>>,
}

impl JsonLinesWriter {
    pub fn new(directory: impl Into<PathBuf>, execution_id: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            execution_id: execution_id.into(),
            writers: HashMap::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn output_path(&self, result_type: ResultType) -> PathBuf {
        self.directory.join(format!(
            "{}{}",
            self.execution_id,
            result_type.file_suffix()
        ))
    }

    /// Files written so far
    pub fn written_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .writers
            .keys()
            .map(|result_type| self.output_path(*result_type))
            .collect();
        files.sort();
        files
    }

    fn writer_for(&mut self, result_type: ResultType) -> ReceiverResult<&mut BufWriter<File>> {
        if !self.writers.contains_key(&result_type) {
            let path = self.output_path(result_type);
            let file = File::create(&path).map_err(|e| {
                ReceiverError::storage(result_type, format!("{}: {}", path.display(), e))
            })?;
            log::debug!("Writing {} results to {}", result_type, path.display());
            self.writers.insert(result_type, BufWriter::new(file));
        }

        self.writers
            .get_mut(&result_type)
            .ok_or_else(|| ReceiverError::storage(result_type, "writer missing"))
    }
}

impl ResultStore for JsonLinesWriter {
    fn store(&mut self, result: AnalysisResult) -> ReceiverResult<()> {
        let result_type = result.result_type();
        let line =
            serde_json::to_string(&result).map_err(|e| ReceiverError::storage(result_type, e))?;
        let writer = self.writer_for(result_type)?;
        writeln!(writer, "{}", line).map_err(|e| ReceiverError::storage(result_type, e))
    }

    fn flush(&mut self) -> ReceiverResult<()> {
        for (result_type, writer) in self.writers.iter_mut() {
            writer
                .flush()
                .map_err(|e| ReceiverError::storage(*result_type, e))?;
        }
        Ok(())
    }
}

impl Drop for JsonLinesWriter {
    fn drop(&mut self) {
        if let Err(e) = ResultStore::flush(self) {
            log::warn!("Failed to flush result files: {}", e);
        }
    }
}

pub type ResultPrinter = ResultReceiver<JsonLinesWriter>;

impl ResultReceiver<JsonLinesWriter> {
    /// Create the results directory if needed
    pub fn create(directory: impl AsRef<Path>, execution_id: &str) -> ReceiverResult<Self> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory).map_err(|e| ReceiverError::CouldNotReceiveResult {
            reason: format!("cannot create {}: {}", directory.display(), e),
        })?;
        Ok(Self::with_store(JsonLinesWriter::new(directory, execution_id)))
    }
}
