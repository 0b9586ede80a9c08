//! Example inclusion and order dependency algorithm
//!
//! Works on database tables only. The connection must be configured before
//! the tables, which is why it is declared first.

use crate::builtin;
use crate::configuration::{
    ConfigResult, ConfigurationRequirement, DatabaseConnectionSetting, DbSystem, RequirementKind,
    TableInputSetting,
};
use crate::plugin::builtin::{emit, not_configured, unknown_identifier};
use crate::plugin::error::{AlgorithmError, AlgorithmResult, PluginResult};
use crate::plugin::traits::{
    Algorithm, DatabaseConnectionParameterAlgorithm, InclusionDependencyAlgorithm,
    OrderDependencyAlgorithm, TableInputParameterAlgorithm,
};
use crate::plugin::types::{AlgorithmInfo, DiscoveredAlgorithm};
use crate::receiver::{InclusionDependencySink, OrderDependencySink};
use crate::results::{ColumnIdentifier, ColumnPermutation, InclusionDependency, OrderDependency};

builtin!(|| DiscoveredAlgorithm::new(
    ExampleIndOdAlgorithm::static_info(),
    ExampleIndOdAlgorithm::create
));

pub const CONNECTION_IDENTIFIER: &str = "connection";
pub const TABLES_IDENTIFIER: &str = "tables";

const KEY_COLUMN: &str = "id";
const REFERENCE_COLUMN: &str = "ref_id";
const ORDER_COLUMN: &str = "created";

#[derive(Debug, Default)]
pub struct ExampleIndOdAlgorithm {
    connection: Option<DatabaseConnectionSetting>,
    tables: Vec<String>,
    ind_sink: Option<InclusionDependencySink>,
    od_sink: Option<OrderDependencySink>,
}

impl ExampleIndOdAlgorithm {
    pub fn static_info() -> AlgorithmInfo {
        AlgorithmInfo {
            name: "example-ind-od".to_string(),
            version: "1.0.0".to_string(),
            description: "Reports a key inclusion and a key order dependency between tables"
                .to_string(),
            authors: vec!["algohost".to_string()],
            api_version: crate::core::version::get_api_version(),
        }
    }

    pub fn create() -> PluginResult<Box<dyn Algorithm>> {
        Ok(Box::new(Self::default()))
    }

    fn column(table: &str, column: &str) -> ColumnPermutation {
        ColumnPermutation::new([ColumnIdentifier::new(table, column)])
    }

    /// The last table references the key of the first one. A single table
    /// references itself.
    fn inclusion(&self, referenced: &str, dependant: &str) -> InclusionDependency {
        InclusionDependency::new(
            Self::column(dependant, REFERENCE_COLUMN),
            Self::column(referenced, KEY_COLUMN),
        )
    }

    fn order(&self, table: &str) -> OrderDependency {
        OrderDependency::lexicographical(
            Self::column(table, KEY_COLUMN),
            Self::column(table, ORDER_COLUMN),
        )
    }
}

impl Algorithm for ExampleIndOdAlgorithm {
    fn info(&self) -> AlgorithmInfo {
        Self::static_info()
    }

    fn configuration_requirements(&self) -> ConfigResult<Vec<ConfigurationRequirement>> {
        Ok(vec![
            ConfigurationRequirement::new(
                CONNECTION_IDENTIFIER,
                RequirementKind::DatabaseConnection {
                    accepted_systems: vec![
                        DbSystem::PostgreSql,
                        DbSystem::MySql,
                        DbSystem::Sqlite,
                        DbSystem::Db2,
                    ],
                },
            )?,
            ConfigurationRequirement::table_input(TABLES_IDENTIFIER)?.with_arity(1, Some(2))?,
        ])
    }

    fn execute(&mut self) -> AlgorithmResult<()> {
        let (first, last) = match (self.tables.first(), self.tables.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(not_configured(TABLES_IDENTIFIER)),
        };
        let ind_sink = self
            .ind_sink
            .as_ref()
            .ok_or_else(|| not_configured("inclusion dependency receiver"))?;
        let od_sink = self
            .od_sink
            .as_ref()
            .ok_or_else(|| not_configured("order dependency receiver"))?;

        emit(ind_sink, self.inclusion(first, last))?;
        for table in &self.tables {
            emit(od_sink, self.order(table))?;
        }
        Ok(())
    }

    fn as_table_input_parameter(&mut self) -> Option<&mut dyn TableInputParameterAlgorithm> {
        Some(self)
    }

    fn as_database_connection_parameter(
        &mut self,
    ) -> Option<&mut dyn DatabaseConnectionParameterAlgorithm> {
        Some(self)
    }

    fn as_inclusion_dependency(&mut self) -> Option<&mut dyn InclusionDependencyAlgorithm> {
        Some(self)
    }

    fn as_order_dependency(&mut self) -> Option<&mut dyn OrderDependencyAlgorithm> {
        Some(self)
    }
}

impl DatabaseConnectionParameterAlgorithm for ExampleIndOdAlgorithm {
    fn set_database_connection_configuration_value(
        &mut self,
        identifier: &str,
        connections: &[DatabaseConnectionSetting],
    ) -> AlgorithmResult<()> {
        if identifier != CONNECTION_IDENTIFIER {
            return Err(unknown_identifier(identifier));
        }
        let connection = connections
            .first()
            .ok_or_else(|| AlgorithmError::configuration(identifier, "no connection given"))?;
        log::debug!("example-ind-od using {}", connection);
        self.connection = Some(connection.clone());
        Ok(())
    }
}

impl TableInputParameterAlgorithm for ExampleIndOdAlgorithm {
    fn set_table_input_configuration_value(
        &mut self,
        identifier: &str,
        tables: &[TableInputSetting],
    ) -> AlgorithmResult<()> {
        if identifier != TABLES_IDENTIFIER {
            return Err(unknown_identifier(identifier));
        }
        let connection = self.connection.as_ref().ok_or_else(|| {
            AlgorithmError::configuration(
                identifier,
                format!("'{}' must be configured first", CONNECTION_IDENTIFIER),
            )
        })?;

        if let Some(foreign) = tables.iter().find(|t| t.connection.url != connection.url) {
            return Err(AlgorithmError::configuration(
                identifier,
                format!(
                    "table '{}' lives on {} instead of {}",
                    foreign.table, foreign.connection, connection
                ),
            ));
        }

        self.tables = tables.iter().map(|t| t.table.clone()).collect();
        Ok(())
    }
}

impl InclusionDependencyAlgorithm for ExampleIndOdAlgorithm {
    fn set_inclusion_dependency_receiver(&mut self, sink: InclusionDependencySink) {
        self.ind_sink = Some(sink);
    }
}

impl OrderDependencyAlgorithm for ExampleIndOdAlgorithm {
    fn set_order_dependency_receiver(&mut self, sink: OrderDependencySink) {
        self.od_sink = Some(sink);
    }
}
