//! Example functional dependency algorithm
//!
//! Takes a table name, a target column, a determinant size and a strictness
//! flag, and reports one functional dependency onto the target column.

use crate::builtin;
use crate::configuration::{ConfigResult, ConfigurationRequirement, RequirementKind};
use crate::plugin::builtin::{emit, not_configured, unknown_identifier};
use crate::plugin::error::{AlgorithmError, AlgorithmResult, PluginResult};
use crate::plugin::traits::{
    Algorithm, BooleanParameterAlgorithm, FunctionalDependencyAlgorithm,
    IntegerParameterAlgorithm, ListBoxParameterAlgorithm, StringParameterAlgorithm,
};
use crate::plugin::types::{AlgorithmInfo, DiscoveredAlgorithm};
use crate::receiver::FunctionalDependencySink;
use crate::results::{ColumnCombination, ColumnIdentifier, FunctionalDependency};

builtin!(|| DiscoveredAlgorithm::new(
    ExampleFdAlgorithm::static_info(),
    ExampleFdAlgorithm::create
));

pub const TABLE_IDENTIFIER: &str = "table";
pub const COLUMN_IDENTIFIER: &str = "column";
pub const DEPTH_IDENTIFIER: &str = "depth";
pub const STRICT_IDENTIFIER: &str = "strict";

const COLUMNS: &[&str] = &["column1", "column2", "column3", "column4"];

#[derive(Debug)]
pub struct ExampleFdAlgorithm {
    table: Option<String>,
    column: Option<String>,
    depth: usize,
    strict: bool,
    sink: Option<FunctionalDependencySink>,
}

impl Default for ExampleFdAlgorithm {
    fn default() -> Self {
        Self {
            table: None,
            column: None,
            depth: 1,
            strict: false,
            sink: None,
        }
    }
}

impl ExampleFdAlgorithm {
    pub fn static_info() -> AlgorithmInfo {
        AlgorithmInfo {
            name: "example-fd".to_string(),
            version: "1.0.0".to_string(),
            description: "Reports one functional dependency onto a chosen column".to_string(),
            authors: vec!["algohost".to_string()],
            api_version: crate::core::version::get_api_version(),
        }
    }

    pub fn create() -> PluginResult<Box<dyn Algorithm>> {
        Ok(Box::new(Self::default()))
    }

    fn dependency(&self, table: &str, target: &str) -> FunctionalDependency {
        let determinant: ColumnCombination = COLUMNS
            .iter()
            .filter(|column| **column != target)
            .take(self.depth)
            .map(|column| ColumnIdentifier::new(table, *column))
            .collect();
        FunctionalDependency::new(determinant, ColumnIdentifier::new(table, target))
    }
}

impl Algorithm for ExampleFdAlgorithm {
    fn info(&self) -> AlgorithmInfo {
        Self::static_info()
    }

    fn configuration_requirements(&self) -> ConfigResult<Vec<ConfigurationRequirement>> {
        Ok(vec![
            ConfigurationRequirement::string(TABLE_IDENTIFIER)?,
            ConfigurationRequirement::list_box(COLUMN_IDENTIFIER, COLUMNS)?,
            ConfigurationRequirement::new(
                DEPTH_IDENTIFIER,
                RequirementKind::Integer {
                    default: Some(1),
                    range: Some((1, COLUMNS.len() as i64 - 1)),
                },
            )?,
            ConfigurationRequirement::new(
                STRICT_IDENTIFIER,
                RequirementKind::Boolean {
                    default: Some(false),
                },
            )?,
        ])
    }

    fn execute(&mut self) -> AlgorithmResult<()> {
        let table = self.table.as_deref().ok_or_else(|| not_configured(TABLE_IDENTIFIER))?;
        let target = self
            .column
            .as_deref()
            .ok_or_else(|| not_configured(COLUMN_IDENTIFIER))?;
        let sink = self
            .sink
            .as_ref()
            .ok_or_else(|| not_configured("functional dependency receiver"))?;

        let fd = self.dependency(table, target);
        if self.strict && !sink.accepts(&fd) {
            return Err(AlgorithmError::execution(format!(
                "{} references columns outside the input",
                fd
            )));
        }

        log::debug!("example-fd found {}", fd);
        emit(sink, fd)?;
        Ok(())
    }

    fn as_string_parameter(&mut self) -> Option<&mut dyn StringParameterAlgorithm> {
        Some(self)
    }

    fn as_boolean_parameter(&mut self) -> Option<&mut dyn BooleanParameterAlgorithm> {
        Some(self)
    }

    fn as_integer_parameter(&mut self) -> Option<&mut dyn IntegerParameterAlgorithm> {
        Some(self)
    }

    fn as_list_box_parameter(&mut self) -> Option<&mut dyn ListBoxParameterAlgorithm> {
        Some(self)
    }

    fn as_functional_dependency(&mut self) -> Option<&mut dyn FunctionalDependencyAlgorithm> {
        Some(self)
    }
}

impl StringParameterAlgorithm for ExampleFdAlgorithm {
    fn set_string_configuration_value(
        &mut self,
        identifier: &str,
        values: &[String],
    ) -> AlgorithmResult<()> {
        if identifier != TABLE_IDENTIFIER {
            return Err(unknown_identifier(identifier));
        }
        match values.first().map(|v| v.trim()) {
            Some(table) if !table.is_empty() => {
                self.table = Some(table.to_string());
                Ok(())
            }
            _ => Err(AlgorithmError::configuration(identifier, "table name is empty")),
        }
    }
}

impl ListBoxParameterAlgorithm for ExampleFdAlgorithm {
    fn set_list_box_configuration_value(
        &mut self,
        identifier: &str,
        selected: &[String],
    ) -> AlgorithmResult<()> {
        if identifier != COLUMN_IDENTIFIER {
            return Err(unknown_identifier(identifier));
        }
        self.column = selected.first().cloned();
        Ok(())
    }
}

impl IntegerParameterAlgorithm for ExampleFdAlgorithm {
    fn set_integer_configuration_value(
        &mut self,
        identifier: &str,
        values: &[i64],
    ) -> AlgorithmResult<()> {
        if identifier != DEPTH_IDENTIFIER {
            return Err(unknown_identifier(identifier));
        }
        let depth = values.first().copied().unwrap_or(1);
        self.depth = usize::try_from(depth)
            .map_err(|_| AlgorithmError::configuration(identifier, "depth must be positive"))?;
        Ok(())
    }
}

impl BooleanParameterAlgorithm for ExampleFdAlgorithm {
    fn set_boolean_configuration_value(
        &mut self,
        identifier: &str,
        values: &[bool],
    ) -> AlgorithmResult<()> {
        if identifier != STRICT_IDENTIFIER {
            return Err(unknown_identifier(identifier));
        }
        self.strict = values.first().copied().unwrap_or(false);
        Ok(())
    }
}

impl FunctionalDependencyAlgorithm for ExampleFdAlgorithm {
    fn set_functional_dependency_receiver(&mut self, sink: FunctionalDependencySink) {
        self.sink = Some(sink);
    }
}
