//! Declared configuration inputs and coercion of raw strings into values
//!
//! A requirement describes what an algorithm needs (identifier, arity and a
//! kind with its schema data) and never carries a value itself. Values are
//! built from raw string inputs with [`ConfigurationRequirement::build_value`]
//! using a fixed coercion table per kind.

use crate::configuration::error::{ConfigResult, ConfigurationError};
use crate::configuration::settings::{
    ConnectionCatalog, DatabaseConnectionSetting, DbSystem, FileFormat, FileInputSetting,
    InMemoryConnectionCatalog, RelationalInputSetting, TableInputSetting,
};
use crate::configuration::value::{ConfigurationValue, ValueKind, ValuePayload};
use serde::Serialize;
use std::fmt;

/// Number of settings a requirement takes, `max = None` meaning unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Arity {
    min: usize,
    max: Option<usize>,
}

impl Arity {
    pub const ONE: Arity = Arity {
        min: 1,
        max: Some(1),
    };

    pub fn new(min: usize, max: Option<usize>) -> Result<Self, String> {
        match max {
            Some(max) if min > max => Err(format!("minimum {} exceeds maximum {}", min, max)),
            _ => Ok(Self { min, max }),
        }
    }

    pub fn exactly(count: usize) -> Self {
        Self {
            min: count,
            max: Some(count),
        }
    }

    pub fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

impl Default for Arity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "exactly {}", max),
            Some(max) => write!(f, "{} to {}", self.min, max),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// Kind of a requirement together with its kind-specific schema data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementKind {
    String {
        defaults: Vec<String>,
    },
    Boolean {
        default: Option<bool>,
    },
    Integer {
        default: Option<i64>,
        /// Inclusive bounds
        range: Option<(i64, i64)>,
    },
    ListBox {
        choices: Vec<String>,
        default: Option<String>,
    },
    CheckBox {
        choices: Vec<String>,
        defaults: Vec<String>,
    },
    FileInput,
    RelationalInput,
    TableInput,
    DatabaseConnection {
        /// Empty accepts every system
        accepted_systems: Vec<DbSystem>,
    },
}

impl RequirementKind {
    pub fn value_kind(&self) -> ValueKind {
        match self {
            RequirementKind::String { .. } => ValueKind::String,
            RequirementKind::Boolean { .. } => ValueKind::Boolean,
            RequirementKind::Integer { .. } => ValueKind::Integer,
            RequirementKind::ListBox { .. } => ValueKind::ListBox,
            RequirementKind::CheckBox { .. } => ValueKind::CheckBox,
            RequirementKind::FileInput => ValueKind::FileInput,
            RequirementKind::RelationalInput => ValueKind::RelationalInput,
            RequirementKind::TableInput => ValueKind::TableInput,
            RequirementKind::DatabaseConnection { .. } => ValueKind::DatabaseConnection,
        }
    }
}

/// UI-agnostic rendering of a requirement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementDescription {
    pub identifier: String,
    pub kind: ValueKind,
    pub min: usize,
    pub max: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub defaults: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(i64, i64)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationRequirement {
    identifier: String,
    arity: Arity,
    kind: RequirementKind,
}

impl ConfigurationRequirement {
    /// Validates the identifier and the kind's schema data
    pub fn new(identifier: impl Into<String>, kind: RequirementKind) -> ConfigResult<Self> {
        let requirement = Self {
            identifier: identifier.into(),
            arity: Arity::ONE,
            kind,
        };
        requirement.validate()?;
        Ok(requirement)
    }

    pub fn string(identifier: impl Into<String>) -> ConfigResult<Self> {
        Self::new(identifier, RequirementKind::String { defaults: vec![] })
    }

    pub fn boolean(identifier: impl Into<String>) -> ConfigResult<Self> {
        Self::new(identifier, RequirementKind::Boolean { default: None })
    }

    pub fn integer(identifier: impl Into<String>) -> ConfigResult<Self> {
        Self::new(
            identifier,
            RequirementKind::Integer {
                default: None,
                range: None,
            },
        )
    }

    pub fn list_box(identifier: impl Into<String>, choices: &[&str]) -> ConfigResult<Self> {
        Self::new(
            identifier,
            RequirementKind::ListBox {
                choices: choices.iter().map(|c| c.to_string()).collect(),
                default: None,
            },
        )
    }

    pub fn check_box(identifier: impl Into<String>, choices: &[&str]) -> ConfigResult<Self> {
        Self::new(
            identifier,
            RequirementKind::CheckBox {
                choices: choices.iter().map(|c| c.to_string()).collect(),
                defaults: vec![],
            },
        )
    }

    pub fn file_input(identifier: impl Into<String>) -> ConfigResult<Self> {
        Self::new(identifier, RequirementKind::FileInput)
    }

    pub fn relational_input(identifier: impl Into<String>) -> ConfigResult<Self> {
        Self::new(identifier, RequirementKind::RelationalInput)
    }

    pub fn table_input(identifier: impl Into<String>) -> ConfigResult<Self> {
        Self::new(identifier, RequirementKind::TableInput)
    }

    pub fn database_connection(identifier: impl Into<String>) -> ConfigResult<Self> {
        Self::new(
            identifier,
            RequirementKind::DatabaseConnection {
                accepted_systems: vec![],
            },
        )
    }

    /// Replace the default `1..1` arity. Fails when `min > max`.
    pub fn with_arity(mut self, min: usize, max: Option<usize>) -> ConfigResult<Self> {
        self.arity = Arity::new(min, max).map_err(|reason| ConfigurationError::Arity {
            requirement: self.identifier.clone(),
            reason,
        })?;
        Ok(self)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn kind(&self) -> &RequirementKind {
        &self.kind
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind.value_kind()
    }

    pub fn validate_arity(&self, count: usize) -> ConfigResult<()> {
        if self.arity.contains(count) {
            Ok(())
        } else {
            Err(ConfigurationError::Arity {
                requirement: self.identifier.clone(),
                reason: format!("expected {}, got {}", self.arity, count),
            })
        }
    }

    /// Whether `value` was built for this requirement
    pub fn matches(&self, value: &ConfigurationValue) -> bool {
        value.identifier() == self.identifier && value.kind() == self.value_kind()
    }

    /// Build a value from raw inputs. Database connections must be given as
    /// descriptors; use [`Self::build_value_with`] to resolve names.
    pub fn build_value(&self, raw: &[String]) -> ConfigResult<ConfigurationValue> {
        self.build_value_with(raw, &InMemoryConnectionCatalog::default())
    }

    pub fn build_value_with(
        &self,
        raw: &[String],
        catalog: &dyn ConnectionCatalog,
    ) -> ConfigResult<ConfigurationValue> {
        self.build_value_with_format(raw, catalog, &FileFormat::default())
    }

    /// Like [`Self::build_value_with`], reading every file input with `format`
    pub fn build_value_with_format(
        &self,
        raw: &[String],
        catalog: &dyn ConnectionCatalog,
        format: &FileFormat,
    ) -> ConfigResult<ConfigurationValue> {
        let payload = match (raw.is_empty(), self.default_payload()) {
            (true, Some(defaults)) => defaults,
            _ => self.coerce(raw, catalog, format)?,
        };

        self.validate_arity(payload.len())?;
        Ok(ConfigurationValue::new(self.identifier.clone(), payload))
    }

    pub fn describe(&self) -> RequirementDescription {
        let (defaults, allowed_values, range) = match &self.kind {
            RequirementKind::String { defaults } => (defaults.clone(), vec![], None),
            RequirementKind::Boolean { default } => (
                default.iter().map(|d| d.to_string()).collect(),
                vec!["true".to_string(), "false".to_string()],
                None,
            ),
            RequirementKind::Integer { default, range } => {
                (default.iter().map(|d| d.to_string()).collect(), vec![], *range)
            }
            RequirementKind::ListBox { choices, default } => {
                (default.iter().cloned().collect(), choices.clone(), None)
            }
            RequirementKind::CheckBox { choices, defaults } => {
                (defaults.clone(), choices.clone(), None)
            }
            RequirementKind::DatabaseConnection { accepted_systems } => (
                vec![],
                accepted_systems.iter().map(|s| s.to_string()).collect(),
                None,
            ),
            RequirementKind::FileInput
            | RequirementKind::RelationalInput
            | RequirementKind::TableInput => (vec![], vec![], None),
        };

        RequirementDescription {
            identifier: self.identifier.clone(),
            kind: self.value_kind(),
            min: self.arity.min(),
            max: self.arity.max(),
            defaults,
            allowed_values,
            range,
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.identifier.trim().is_empty() {
            return Err(self.invalid("identifier must not be empty"));
        }

        match &self.kind {
            RequirementKind::Integer {
                default,
                range: Some((min, max)),
            } => {
                if min > max {
                    return Err(self.invalid(format!("range {}..={} is empty", min, max)));
                }
                if let Some(default) = default.filter(|d| d < min || d > max) {
                    return Err(self.invalid(format!("default {} is outside the range", default)));
                }
            }
            RequirementKind::ListBox { choices, default } => {
                if choices.is_empty() {
                    return Err(self.invalid("list box needs at least one choice"));
                }
                if let Some(default) = default.as_ref().filter(|d| !choices.contains(*d)) {
                    return Err(self.invalid(format!("default '{}' is not a choice", default)));
                }
            }
            RequirementKind::CheckBox { choices, defaults } => {
                if choices.is_empty() {
                    return Err(self.invalid("check box needs at least one choice"));
                }
                if let Some(default) = defaults.iter().find(|d| !choices.contains(*d)) {
                    return Err(self.invalid(format!("default '{}' is not a choice", default)));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> ConfigurationError {
        ConfigurationError::InvalidRequirement {
            identifier: self.identifier.clone(),
            reason: reason.into(),
        }
    }

    fn coercion_error(&self, input: &str, reason: impl Into<String>) -> ConfigurationError {
        ConfigurationError::Coercion {
            requirement: self.identifier.clone(),
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    fn default_payload(&self) -> Option<ValuePayload> {
        match &self.kind {
            RequirementKind::String { defaults } if !defaults.is_empty() => {
                Some(ValuePayload::String(defaults.clone()))
            }
            RequirementKind::Boolean { default: Some(d) } => Some(ValuePayload::Boolean(vec![*d])),
            RequirementKind::Integer {
                default: Some(d), ..
            } => Some(ValuePayload::Integer(vec![*d])),
            RequirementKind::ListBox {
                default: Some(d), ..
            } => Some(ValuePayload::ListBox(vec![d.clone()])),
            RequirementKind::CheckBox { defaults, .. } if !defaults.is_empty() => {
                Some(ValuePayload::CheckBox(defaults.clone()))
            }
            _ => None,
        }
    }

    fn coerce(
        &self,
        raw: &[String],
        catalog: &dyn ConnectionCatalog,
        format: &FileFormat,
    ) -> ConfigResult<ValuePayload> {
        let payload = match &self.kind {
            RequirementKind::String { .. } => ValuePayload::String(raw.to_vec()),
            RequirementKind::Boolean { .. } => ValuePayload::Boolean(
                raw.iter()
                    .map(|input| self.coerce_boolean(input))
                    .collect::<ConfigResult<_>>()?,
            ),
            RequirementKind::Integer { range, .. } => ValuePayload::Integer(
                raw.iter()
                    .map(|input| self.coerce_integer(input, *range))
                    .collect::<ConfigResult<_>>()?,
            ),
            RequirementKind::ListBox { choices, .. } => {
                ValuePayload::ListBox(self.coerce_choices(raw, choices)?)
            }
            RequirementKind::CheckBox { choices, .. } => {
                ValuePayload::CheckBox(self.coerce_choices(raw, choices)?)
            }
            RequirementKind::FileInput => {
                let mut files = Vec::new();
                for input in raw {
                    files.extend(self.expand_files(input, format)?);
                }
                ValuePayload::FileInput(files)
            }
            RequirementKind::RelationalInput => {
                let mut inputs = Vec::new();
                for input in raw {
                    if input.contains('#') {
                        let table = self.coerce_table(input, catalog)?;
                        inputs.push(RelationalInputSetting::Table(table));
                    } else {
                        inputs.extend(
                            self.expand_files(input, format)?
                                .into_iter()
                                .map(RelationalInputSetting::File),
                        );
                    }
                }
                ValuePayload::RelationalInput(inputs)
            }
            RequirementKind::TableInput => ValuePayload::TableInput(
                raw.iter()
                    .map(|input| self.coerce_table(input, catalog))
                    .collect::<ConfigResult<_>>()?,
            ),
            RequirementKind::DatabaseConnection { .. } => ValuePayload::DatabaseConnection(
                raw.iter()
                    .map(|input| self.coerce_connection(input, catalog))
                    .collect::<ConfigResult<_>>()?,
            ),
        };
        Ok(payload)
    }

    fn coerce_boolean(&self, input: &str) -> ConfigResult<bool> {
        match input.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => Err(self.coercion_error(input, "expected a boolean")),
        }
    }

    fn coerce_integer(&self, input: &str, range: Option<(i64, i64)>) -> ConfigResult<i64> {
        let value: i64 = input
            .trim()
            .parse()
            .map_err(|_| self.coercion_error(input, "expected an integer"))?;

        match range {
            Some((min, max)) if value < min || value > max => Err(self.coercion_error(
                input,
                format!("must be between {} and {}", min, max),
            )),
            _ => Ok(value),
        }
    }

    fn coerce_choices(&self, raw: &[String], choices: &[String]) -> ConfigResult<Vec<String>> {
        raw.iter()
            .map(|input| {
                if choices.contains(input) {
                    Ok(input.clone())
                } else {
                    Err(self.coercion_error(
                        input,
                        format!("expected one of: {}", choices.join(", ")),
                    ))
                }
            })
            .collect()
    }

    /// Plain paths are patterns that only match themselves
    fn expand_files(
        &self,
        input: &str,
        format: &FileFormat,
    ) -> ConfigResult<Vec<FileInputSetting>> {
        format
            .validate()
            .map_err(|reason| self.coercion_error(input, reason))?;

        let paths = glob::glob(input)
            .map_err(|e| self.coercion_error(input, format!("invalid pattern: {}", e)))?;

        let mut files = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| self.coercion_error(input, e.to_string()))?;
            if path.is_file() {
                files.push(FileInputSetting::with_format(path, format.clone()));
            }
        }

        if files.is_empty() {
            return Err(self.coercion_error(input, "no file matches"));
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn coerce_connection(
        &self,
        input: &str,
        catalog: &dyn ConnectionCatalog,
    ) -> ConfigResult<DatabaseConnectionSetting> {
        let connection = if input.contains("://") {
            DatabaseConnectionSetting::parse_descriptor(input)
                .map_err(|reason| self.coercion_error(input, reason))?
        } else {
            catalog
                .lookup(input.trim())
                .ok_or_else(|| self.coercion_error(input, "unknown database connection"))?
        };

        if let RequirementKind::DatabaseConnection { accepted_systems } = &self.kind {
            if !accepted_systems.is_empty() && !accepted_systems.contains(&connection.system) {
                return Err(self.coercion_error(
                    input,
                    format!("{} connections are not accepted", connection.system),
                ));
            }
        }
        Ok(connection)
    }

    /// `<connection>#<table>`, split at the last `#`
    fn coerce_table(
        &self,
        input: &str,
        catalog: &dyn ConnectionCatalog,
    ) -> ConfigResult<TableInputSetting> {
        let (connection, table) = input
            .rsplit_once('#')
            .filter(|(c, t)| !c.trim().is_empty() && !t.trim().is_empty())
            .ok_or_else(|| self.coercion_error(input, "expected '<connection>#<table>'"))?;

        let connection = self.coerce_connection(connection, catalog)?;
        Ok(TableInputSetting::new(connection, table.trim()))
    }
}
