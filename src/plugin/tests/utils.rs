//! Plugin Test Utilities
//!
//! A configurable mock algorithm shared by the dispatch and analyzer tests.

use crate::configuration::{
    ConfigResult, ConfigurationRequirement, ConfigurationValue, DatabaseConnectionSetting,
    DbSystem, FileInputSetting, RelationalInputSetting, TableInputSetting, ValuePayload,
};
use crate::core::shutdown::CancellationFlag;
use crate::plugin::capability::{CapabilityKind, CapabilitySet};
use crate::plugin::error::{AlgorithmError, AlgorithmResult, PluginError};
use crate::plugin::traits::*;
use crate::plugin::types::{AlgorithmInfo, DiscoveredAlgorithm};
use crate::receiver::{BasicStatisticSink, FunctionalDependencySink};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Deliveries seen by a mock, as `identifier:capability-label`
pub type DeliveryLog = Arc<Mutex<Vec<String>>>;

/// Mock algorithm whose accessors return `Some` exactly for `exposed`
#[derive(Debug)]
pub struct MockAlgorithm {
    pub name: String,
    pub exposed: CapabilitySet,
    pub log: DeliveryLog,
    pub reject: Option<String>,
    pub cancel_on: Option<(String, CancellationFlag)>,
    pub fd_sink: Option<FunctionalDependencySink>,
    pub stats_sink: Option<BasicStatisticSink>,
}

impl MockAlgorithm {
    pub fn new(name: &str, exposed: &[CapabilityKind]) -> Self {
        Self {
            name: name.to_string(),
            exposed: CapabilitySet::new(exposed.iter().copied()),
            log: Arc::new(Mutex::new(Vec::new())),
            reject: None,
            cancel_on: None,
            fd_sink: None,
            stats_sink: None,
        }
    }

    /// Fail the setter for `identifier`
    pub fn rejecting(mut self, identifier: &str) -> Self {
        self.reject = Some(identifier.to_string());
        self
    }

    /// Cancel `flag` while `identifier` is being delivered
    pub fn cancelling_on(mut self, identifier: &str, flag: CancellationFlag) -> Self {
        self.cancel_on = Some((identifier.to_string(), flag));
        self
    }

    pub fn deliveries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn exposes(&self, kind: CapabilityKind) -> bool {
        self.exposed.satisfies(kind)
    }

    fn record(&mut self, identifier: &str, kind: CapabilityKind) -> AlgorithmResult<()> {
        if self.reject.as_deref() == Some(identifier) {
            return Err(AlgorithmError::configuration(identifier, "mock rejects this value"));
        }
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", identifier, kind.label()));
        if let Some((trigger, flag)) = &self.cancel_on {
            if trigger == identifier {
                flag.cancel();
            }
        }
        Ok(())
    }
}

macro_rules! expose {
    ($self:ident, $kind:expr) => {
        if $self.exposes($kind) {
            Some($self)
        } else {
            None
        }
    };
}

impl Algorithm for MockAlgorithm {
    fn info(&self) -> AlgorithmInfo {
        mock_info(&self.name)
    }

    fn configuration_requirements(&self) -> ConfigResult<Vec<ConfigurationRequirement>> {
        Ok(vec![])
    }

    fn execute(&mut self) -> AlgorithmResult<()> {
        Ok(())
    }

    fn as_string_parameter(&mut self) -> Option<&mut dyn StringParameterAlgorithm> {
        expose!(self, CapabilityKind::StringParameter)
    }

    fn as_boolean_parameter(&mut self) -> Option<&mut dyn BooleanParameterAlgorithm> {
        expose!(self, CapabilityKind::BooleanParameter)
    }

    fn as_integer_parameter(&mut self) -> Option<&mut dyn IntegerParameterAlgorithm> {
        expose!(self, CapabilityKind::IntegerParameter)
    }

    fn as_list_box_parameter(&mut self) -> Option<&mut dyn ListBoxParameterAlgorithm> {
        expose!(self, CapabilityKind::ListBoxParameter)
    }

    fn as_check_box_parameter(&mut self) -> Option<&mut dyn CheckBoxParameterAlgorithm> {
        expose!(self, CapabilityKind::CheckBoxParameter)
    }

    fn as_file_input_parameter(&mut self) -> Option<&mut dyn FileInputParameterAlgorithm> {
        expose!(self, CapabilityKind::FileInputParameter)
    }

    fn as_relational_input_parameter(
        &mut self,
    ) -> Option<&mut dyn RelationalInputParameterAlgorithm> {
        expose!(self, CapabilityKind::RelationalInputParameter)
    }

    fn as_table_input_parameter(&mut self) -> Option<&mut dyn TableInputParameterAlgorithm> {
        expose!(self, CapabilityKind::TableInputParameter)
    }

    fn as_database_connection_parameter(
        &mut self,
    ) -> Option<&mut dyn DatabaseConnectionParameterAlgorithm> {
        expose!(self, CapabilityKind::DatabaseConnectionParameter)
    }

    fn as_functional_dependency(&mut self) -> Option<&mut dyn FunctionalDependencyAlgorithm> {
        expose!(self, CapabilityKind::FunctionalDependency)
    }

    fn as_basic_statistic(&mut self) -> Option<&mut dyn BasicStatisticAlgorithm> {
        expose!(self, CapabilityKind::BasicStatistic)
    }

    fn as_temp_file(&mut self) -> Option<&mut dyn TempFileAlgorithm> {
        expose!(self, CapabilityKind::TempFile)
    }
}

impl StringParameterAlgorithm for MockAlgorithm {
    fn set_string_configuration_value(&mut self, id: &str, _: &[String]) -> AlgorithmResult<()> {
        self.record(id, CapabilityKind::StringParameter)
    }
}

impl BooleanParameterAlgorithm for MockAlgorithm {
    fn set_boolean_configuration_value(&mut self, id: &str, _: &[bool]) -> AlgorithmResult<()> {
        self.record(id, CapabilityKind::BooleanParameter)
    }
}

impl IntegerParameterAlgorithm for MockAlgorithm {
    fn set_integer_configuration_value(&mut self, id: &str, _: &[i64]) -> AlgorithmResult<()> {
        self.record(id, CapabilityKind::IntegerParameter)
    }
}

impl ListBoxParameterAlgorithm for MockAlgorithm {
    fn set_list_box_configuration_value(&mut self, id: &str, _: &[String]) -> AlgorithmResult<()> {
        self.record(id, CapabilityKind::ListBoxParameter)
    }
}

impl CheckBoxParameterAlgorithm for MockAlgorithm {
    fn set_check_box_configuration_value(
        &mut self,
        id: &str,
        _: &[String],
    ) -> AlgorithmResult<()> {
        self.record(id, CapabilityKind::CheckBoxParameter)
    }
}

impl FileInputParameterAlgorithm for MockAlgorithm {
    fn set_file_input_configuration_value(
        &mut self,
        id: &str,
        _: &[FileInputSetting],
    ) -> AlgorithmResult<()> {
        self.record(id, CapabilityKind::FileInputParameter)
    }
}

impl RelationalInputParameterAlgorithm for MockAlgorithm {
    fn set_relational_input_configuration_value(
        &mut self,
        id: &str,
        _: &[RelationalInputSetting],
    ) -> AlgorithmResult<()> {
        self.record(id, CapabilityKind::RelationalInputParameter)
    }
}

impl TableInputParameterAlgorithm for MockAlgorithm {
    fn set_table_input_configuration_value(
        &mut self,
        id: &str,
        _: &[TableInputSetting],
    ) -> AlgorithmResult<()> {
        self.record(id, CapabilityKind::TableInputParameter)
    }
}

impl DatabaseConnectionParameterAlgorithm for MockAlgorithm {
    fn set_database_connection_configuration_value(
        &mut self,
        id: &str,
        _: &[DatabaseConnectionSetting],
    ) -> AlgorithmResult<()> {
        self.record(id, CapabilityKind::DatabaseConnectionParameter)
    }
}

impl FunctionalDependencyAlgorithm for MockAlgorithm {
    fn set_functional_dependency_receiver(&mut self, sink: FunctionalDependencySink) {
        self.fd_sink = Some(sink);
    }
}

impl BasicStatisticAlgorithm for MockAlgorithm {
    fn set_basic_statistic_receiver(&mut self, sink: BasicStatisticSink) {
        self.stats_sink = Some(sink);
    }
}

impl TempFileAlgorithm for MockAlgorithm {
    fn set_temp_directory(&mut self, _directory: &Path) {}
}

pub fn mock_info(name: &str) -> AlgorithmInfo {
    AlgorithmInfo {
        name: name.to_string(),
        version: "1.0.0".to_string(),
        description: "Mock algorithm for testing".to_string(),
        authors: vec!["Test Author".to_string()],
        api_version: crate::core::version::get_api_version(),
    }
}

/// Descriptor whose factory counts its invocations
pub fn counting_descriptor(
    name: &str,
    exposed: &[CapabilityKind],
    calls: Arc<AtomicUsize>,
) -> DiscoveredAlgorithm {
    let owned_name = name.to_string();
    let exposed = exposed.to_vec();
    DiscoveredAlgorithm::new(mock_info(name), move || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockAlgorithm::new(&owned_name, &exposed)) as Box<dyn Algorithm>)
    })
}

/// Descriptor whose factory always fails
pub fn broken_descriptor(name: &str, calls: Arc<AtomicUsize>) -> DiscoveredAlgorithm {
    let owned_name = name.to_string();
    DiscoveredAlgorithm::new(mock_info(name), move || {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(PluginError::ExecutionError {
            plugin_name: owned_name.clone(),
            operation: "instantiate".to_string(),
            cause: "missing native library".to_string(),
        })
    })
}

pub fn string_pair(identifier: &str, value: &str) -> (ConfigurationRequirement, ConfigurationValue) {
    let requirement = ConfigurationRequirement::string(identifier).unwrap();
    let value = requirement.build_value(&[value.to_string()]).unwrap();
    (requirement, value)
}

pub fn boolean_pair(identifier: &str, value: bool) -> (ConfigurationRequirement, ConfigurationValue) {
    let requirement = ConfigurationRequirement::boolean(identifier).unwrap();
    let value = ConfigurationValue::new(identifier, ValuePayload::Boolean(vec![value]));
    (requirement, value)
}

pub fn connection_pair(identifier: &str) -> (ConfigurationRequirement, ConfigurationValue) {
    let requirement = ConfigurationRequirement::database_connection(identifier).unwrap();
    let value = ConfigurationValue::new(
        identifier,
        ValuePayload::DatabaseConnection(vec![DatabaseConnectionSetting::new(
            "localhost/metadata",
            "profiler",
            "secret",
            DbSystem::PostgreSql,
        )]),
    );
    (requirement, value)
}
