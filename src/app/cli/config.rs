//! TOML configuration file
//!
//! The file supplies defaults for the global options, the input schema,
//! named database connections and the raw inputs of each algorithm:
//!
//! ```toml
//! log-level = "debug"
//! results-dir = "results"
//!
//! [schema]
//! columns = ["people.name", "people.age"]
//!
//! [connections.warehouse]
//! url = "localhost:5432/warehouse"
//! username = "profiler"
//! password = "secret"
//! system = "postgresql"
//!
//! [algorithms.example-fd]
//! table = "people"
//! column = ["age", "name"]
//! depth = 2
//!
//! [files.example-stats.files]
//! separator = "\t"
//! header = false
//! skip-lines = 1
//! null-value = "NA"
//! ```
//!
//! A `[files.ALGORITHM.IDENTIFIER]` table sets how the files given for one
//! file or relational input are read. Unset keys keep the CSV defaults and an
//! empty `escape` disables backslash escapes.

use super::args::InputOverride;
use crate::configuration::{
    DatabaseConnectionSetting, DbSystem, FileFormat, InMemoryConnectionCatalog,
};
use crate::core::error_handling::ContextualError;
use crate::execution::ExecutionRequest;
use crate::receiver::InputSchema;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("The specified configuration file does not exist: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration value for '{key}': {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigFileError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigFileError::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl ContextualError for ConfigFileError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigFileError::Read { .. })
    }

    fn user_message(&self) -> Option<String> {
        self.is_user_actionable().then(|| self.to_string())
    }
}

/// Values read from the configuration file
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
    pub results_dir: Option<PathBuf>,
    pub schema_columns: Vec<String>,
    pub connections: InMemoryConnectionCatalog,
    pub algorithms: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    pub file_formats: BTreeMap<String, BTreeMap<String, FileFormat>>,
}

impl AppConfig {
    /// Load `explicit`, which must exist, or the default file when present
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigFileError> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigFileError::Missing {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigFileError::Read {
                path: path.clone(),
                source,
            })?;
        let table = toml::from_str::<toml::Table>(&contents)
            .map_err(|source| ConfigFileError::Parse { path, source })?;

        let mut config = Self::default();
        config.apply_toml_values(&table)?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Algohost").join("algohost.toml"))
    }

    pub fn apply_toml_values(&mut self, config: &toml::Table) -> Result<(), ConfigFileError> {
        for (key, value) in config {
            match key.as_str() {
                "log-level" => {
                    let level = string_field(key, value)?;
                    if !["trace", "debug", "info", "warn", "error", "off"].contains(&level.as_str()) {
                        return Err(ConfigFileError::invalid(key, format!("unknown level '{}'", level)));
                    }
                    self.log_level = Some(level);
                }
                "log-format" => {
                    let format = string_field(key, value)?;
                    if !["text", "ext", "json"].contains(&format.as_str()) {
                        return Err(ConfigFileError::invalid(key, format!("unknown format '{}'", format)));
                    }
                    self.log_format = Some(format);
                }
                "log-file" => {
                    let file = string_field(key, value)?;
                    self.log_file = if file.eq_ignore_ascii_case("none") || file == "-" {
                        None
                    } else {
                        Some(PathBuf::from(file))
                    };
                }
                "color" => self.color = Some(bool_field(key, value)?),
                "no-color" => {
                    if bool_field(key, value)? {
                        self.color = Some(false);
                    }
                }
                "results-dir" => self.results_dir = Some(PathBuf::from(string_field(key, value)?)),
                "schema" => self.apply_schema(table_field(key, value)?)?,
                "connections" => self.apply_connections(table_field(key, value)?)?,
                "algorithms" => self.apply_algorithms(table_field(key, value)?)?,
                "files" => self.apply_files(table_field(key, value)?)?,
                _ => return Err(ConfigFileError::invalid(key, "unknown setting")),
            }
        }
        Ok(())
    }

    fn apply_schema(&mut self, schema: &toml::Table) -> Result<(), ConfigFileError> {
        for (key, value) in schema {
            match key.as_str() {
                "columns" => self.schema_columns = raw_values("schema.columns", value)?,
                _ => return Err(ConfigFileError::invalid(&format!("schema.{}", key), "unknown setting")),
            }
        }
        Ok(())
    }

    fn apply_connections(&mut self, connections: &toml::Table) -> Result<(), ConfigFileError> {
        for (name, value) in connections {
            let key = format!("connections.{}", name);
            let fields = table_field(&key, value)?;
            let text = |field: &str| -> Result<Option<String>, ConfigFileError> {
                fields
                    .get(field)
                    .map(|v| string_field(&format!("{}.{}", key, field), v))
                    .transpose()
            };

            let url = text("url")?.ok_or_else(|| ConfigFileError::invalid(&key, "missing 'url'"))?;
            let system = match text("system")? {
                Some(system) => DbSystem::from_str(&system).map_err(|_| {
                    ConfigFileError::invalid(&key, format!("unknown database system '{}'", system))
                })?,
                None => return Err(ConfigFileError::invalid(&key, "missing 'system'")),
            };
            let connection = DatabaseConnectionSetting::new(
                url,
                text("username")?.unwrap_or_default(),
                text("password")?.unwrap_or_default(),
                system,
            );
            self.connections.insert(name.clone(), connection);
        }
        Ok(())
    }

    fn apply_algorithms(&mut self, algorithms: &toml::Table) -> Result<(), ConfigFileError> {
        for (name, value) in algorithms {
            let key = format!("algorithms.{}", name);
            let inputs = table_field(&key, value)?
                .iter()
                .map(|(identifier, raw)| {
                    raw_values(&format!("{}.{}", key, identifier), raw)
                        .map(|values| (identifier.clone(), values))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()?;
            self.algorithms.insert(name.clone(), inputs);
        }
        Ok(())
    }

    fn apply_files(&mut self, files: &toml::Table) -> Result<(), ConfigFileError> {
        for (algorithm, value) in files {
            let algorithm_key = format!("files.{}", algorithm);
            for (identifier, value) in table_field(&algorithm_key, value)? {
                let key = format!("{}.{}", algorithm_key, identifier);
                let format = file_format(&key, table_field(&key, value)?)?;
                self.file_formats
                    .entry(algorithm.clone())
                    .or_default()
                    .insert(identifier.clone(), format);
            }
        }
        Ok(())
    }

    /// Schema to validate result columns against, if one was configured
    pub fn schema(&self) -> Result<Option<InputSchema>, ConfigFileError> {
        if self.schema_columns.is_empty() {
            return Ok(None);
        }
        InputSchema::parse(&self.schema_columns)
            .map(Some)
            .map_err(|reason| ConfigFileError::invalid("schema.columns", reason))
    }

    /// Request for `algorithm` with configured inputs; overrides for the same
    /// identifier replace the configured values
    pub fn request_for(&self, algorithm: &str, overrides: &[InputOverride]) -> ExecutionRequest {
        let mut inputs = self.algorithms.get(algorithm).cloned().unwrap_or_default();

        let mut replaced: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for input in overrides.iter().filter(|o| o.algorithm == algorithm) {
            replaced
                .entry(input.identifier.as_str())
                .or_default()
                .push(input.value.clone());
        }
        for (identifier, values) in replaced {
            inputs.insert(identifier.to_string(), values);
        }

        let request = inputs
            .into_iter()
            .fold(ExecutionRequest::new(algorithm), |request, (identifier, values)| {
                request.with_input(identifier, values)
            });

        self.file_formats
            .get(algorithm)
            .into_iter()
            .flatten()
            .fold(request, |request, (identifier, format)| {
                request.with_file_format(identifier.clone(), format.clone())
            })
    }
}

fn string_field(key: &str, value: &toml::Value) -> Result<String, ConfigFileError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigFileError::invalid(key, "expected a string"))
}

fn bool_field(key: &str, value: &toml::Value) -> Result<bool, ConfigFileError> {
    value
        .as_bool()
        .ok_or_else(|| ConfigFileError::invalid(key, "expected true or false"))
}

fn char_field(key: &str, value: &toml::Value) -> Result<Option<char>, ConfigFileError> {
    let text = string_field(key, value)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) => Ok(Some(c)),
        _ => Err(ConfigFileError::invalid(key, "expected a single character")),
    }
}

fn file_format(key: &str, fields: &toml::Table) -> Result<FileFormat, ConfigFileError> {
    let mut format = FileFormat::default();
    for (name, value) in fields {
        let field_key = format!("{}.{}", key, name);
        let required = |c: Option<char>| {
            c.ok_or_else(|| ConfigFileError::invalid(&field_key, "must not be empty"))
        };
        match name.as_str() {
            "separator" => format.separator = required(char_field(&field_key, value)?)?,
            "quote" => format.quote_char = required(char_field(&field_key, value)?)?,
            "escape" => format.escape_char = char_field(&field_key, value)?,
            "trim" => format.trim_whitespace = bool_field(&field_key, value)?,
            "header" => format.header = bool_field(&field_key, value)?,
            "skip-lines" => {
                format.skip_lines = value
                    .as_integer()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| {
                        ConfigFileError::invalid(&field_key, "expected a non-negative integer")
                    })?
            }
            "null-value" => format.null_value = string_field(&field_key, value)?,
            _ => return Err(ConfigFileError::invalid(&field_key, "unknown setting")),
        }
    }
    format
        .validate()
        .map_err(|reason| ConfigFileError::invalid(key, reason))?;
    Ok(format)
}

fn table_field<'a>(key: &str, value: &'a toml::Value) -> Result<&'a toml::Table, ConfigFileError> {
    value
        .as_table()
        .ok_or_else(|| ConfigFileError::invalid(key, "expected a table"))
}

/// Raw inputs from a scalar or an array of scalars
fn raw_values(key: &str, value: &toml::Value) -> Result<Vec<String>, ConfigFileError> {
    fn scalar(key: &str, value: &toml::Value) -> Result<String, ConfigFileError> {
        match value {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Float(f) => Ok(f.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            toml::Value::Datetime(d) => Ok(d.to_string()),
            _ => Err(ConfigFileError::invalid(key, "expected a scalar value")),
        }
    }

    match value {
        toml::Value::Array(items) => items.iter().map(|item| scalar(key, item)).collect(),
        other => scalar(key, other).map(|s| vec![s]),
    }
}
