//! Algorithm Trait System
//!
//! Every algorithm implements [`Algorithm`]. What else it can do is expressed
//! through capability traits (one per configuration value kind, one per
//! result type, plus [`TempFileAlgorithm`]). The host never downcasts: it asks
//! the `as_*` accessors once when the algorithm is analyzed and keeps the
//! answers as a [`CapabilitySet`](crate::plugin::capability::CapabilitySet).
//!
//! An algorithm that supports a capability implements the trait and overrides
//! the matching accessor to return `Some(self)`:
//!
//! ```rust,ignore
//! impl Algorithm for MyAlgorithm {
//!     fn as_boolean_parameter(&mut self) -> Option<&mut dyn BooleanParameterAlgorithm> {
//!         Some(self)
//!     }
//!     // ...
//! }
//! ```

use crate::configuration::{
    ConfigResult, ConfigurationRequirement, DatabaseConnectionSetting, FileInputSetting,
    RelationalInputSetting, TableInputSetting,
};
use crate::plugin::error::AlgorithmResult;
use crate::plugin::types::AlgorithmInfo;
use crate::receiver::{
    BasicStatisticSink, ConditionalUniqueColumnCombinationSink, FunctionalDependencySink,
    InclusionDependencySink, OrderDependencySink, UniqueColumnCombinationSink,
};
use std::path::Path;

/// Base trait that all algorithms must implement
pub trait Algorithm: Send {
    fn info(&self) -> AlgorithmInfo;

    /// Declared inputs in delivery order
    fn configuration_requirements(&self) -> ConfigResult<Vec<ConfigurationRequirement>>;

    /// Run once configured. Results go to the sinks handed over beforehand.
    fn execute(&mut self) -> AlgorithmResult<()>;

    fn as_string_parameter(&mut self) -> Option<&mut dyn StringParameterAlgorithm> {
        None
    }

    fn as_boolean_parameter(&mut self) -> Option<&mut dyn BooleanParameterAlgorithm> {
        None
    }

    fn as_integer_parameter(&mut self) -> Option<&mut dyn IntegerParameterAlgorithm> {
        None
    }

    fn as_list_box_parameter(&mut self) -> Option<&mut dyn ListBoxParameterAlgorithm> {
        None
    }

    fn as_check_box_parameter(&mut self) -> Option<&mut dyn CheckBoxParameterAlgorithm> {
        None
    }

    fn as_file_input_parameter(&mut self) -> Option<&mut dyn FileInputParameterAlgorithm> {
        None
    }

    fn as_relational_input_parameter(
        &mut self,
    ) -> Option<&mut dyn RelationalInputParameterAlgorithm> {
        None
    }

    fn as_table_input_parameter(&mut self) -> Option<&mut dyn TableInputParameterAlgorithm> {
        None
    }

    fn as_database_connection_parameter(
        &mut self,
    ) -> Option<&mut dyn DatabaseConnectionParameterAlgorithm> {
        None
    }

    fn as_functional_dependency(&mut self) -> Option<&mut dyn FunctionalDependencyAlgorithm> {
        None
    }

    fn as_inclusion_dependency(&mut self) -> Option<&mut dyn InclusionDependencyAlgorithm> {
        None
    }

    fn as_unique_column_combination(
        &mut self,
    ) -> Option<&mut dyn UniqueColumnCombinationAlgorithm> {
        None
    }

    fn as_conditional_unique_column_combination(
        &mut self,
    ) -> Option<&mut dyn ConditionalUniqueColumnCombinationAlgorithm> {
        None
    }

    fn as_order_dependency(&mut self) -> Option<&mut dyn OrderDependencyAlgorithm> {
        None
    }

    fn as_basic_statistic(&mut self) -> Option<&mut dyn BasicStatisticAlgorithm> {
        None
    }

    fn as_temp_file(&mut self) -> Option<&mut dyn TempFileAlgorithm> {
        None
    }
}

pub trait StringParameterAlgorithm {
    fn set_string_configuration_value(
        &mut self,
        identifier: &str,
        values: &[String],
    ) -> AlgorithmResult<()>;
}

pub trait BooleanParameterAlgorithm {
    fn set_boolean_configuration_value(
        &mut self,
        identifier: &str,
        values: &[bool],
    ) -> AlgorithmResult<()>;
}

pub trait IntegerParameterAlgorithm {
    fn set_integer_configuration_value(
        &mut self,
        identifier: &str,
        values: &[i64],
    ) -> AlgorithmResult<()>;
}

pub trait ListBoxParameterAlgorithm {
    fn set_list_box_configuration_value(
        &mut self,
        identifier: &str,
        selected: &[String],
    ) -> AlgorithmResult<()>;
}

pub trait CheckBoxParameterAlgorithm {
    fn set_check_box_configuration_value(
        &mut self,
        identifier: &str,
        selected: &[String],
    ) -> AlgorithmResult<()>;
}

pub trait FileInputParameterAlgorithm {
    fn set_file_input_configuration_value(
        &mut self,
        identifier: &str,
        files: &[FileInputSetting],
    ) -> AlgorithmResult<()>;
}

pub trait RelationalInputParameterAlgorithm {
    fn set_relational_input_configuration_value(
        &mut self,
        identifier: &str,
        inputs: &[RelationalInputSetting],
    ) -> AlgorithmResult<()>;
}

pub trait TableInputParameterAlgorithm {
    fn set_table_input_configuration_value(
        &mut self,
        identifier: &str,
        tables: &[TableInputSetting],
    ) -> AlgorithmResult<()>;
}

pub trait DatabaseConnectionParameterAlgorithm {
    fn set_database_connection_configuration_value(
        &mut self,
        identifier: &str,
        connections: &[DatabaseConnectionSetting],
    ) -> AlgorithmResult<()>;
}

pub trait FunctionalDependencyAlgorithm {
    fn set_functional_dependency_receiver(&mut self, sink: FunctionalDependencySink);
}

pub trait InclusionDependencyAlgorithm {
    fn set_inclusion_dependency_receiver(&mut self, sink: InclusionDependencySink);
}

pub trait UniqueColumnCombinationAlgorithm {
    fn set_unique_column_combination_receiver(&mut self, sink: UniqueColumnCombinationSink);
}

pub trait ConditionalUniqueColumnCombinationAlgorithm {
    fn set_conditional_unique_column_combination_receiver(
        &mut self,
        sink: ConditionalUniqueColumnCombinationSink,
    );
}

pub trait OrderDependencyAlgorithm {
    fn set_order_dependency_receiver(&mut self, sink: OrderDependencySink);
}

pub trait BasicStatisticAlgorithm {
    fn set_basic_statistic_receiver(&mut self, sink: BasicStatisticSink);
}

/// Algorithms that spill to disk get a scratch directory removed after the run
pub trait TempFileAlgorithm {
    fn set_temp_directory(&mut self, directory: &Path);
}
