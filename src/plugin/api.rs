//! Public API for the plugin system
//!
//! External modules should import from here rather than directly from
//! internal modules.

// Algorithm contract and capability traits
pub use crate::plugin::traits::{
    Algorithm, BasicStatisticAlgorithm, BooleanParameterAlgorithm, CheckBoxParameterAlgorithm,
    ConditionalUniqueColumnCombinationAlgorithm, DatabaseConnectionParameterAlgorithm,
    FileInputParameterAlgorithm, FunctionalDependencyAlgorithm, InclusionDependencyAlgorithm,
    IntegerParameterAlgorithm, ListBoxParameterAlgorithm, OrderDependencyAlgorithm,
    RelationalInputParameterAlgorithm, StringParameterAlgorithm, TableInputParameterAlgorithm,
    TempFileAlgorithm, UniqueColumnCombinationAlgorithm,
};

// Error handling
pub use crate::plugin::error::{AlgorithmError, AlgorithmResult, PluginError, PluginResult};

// Algorithm metadata and factories
pub use crate::plugin::types::{AlgorithmFactory, AlgorithmInfo, DiscoveredAlgorithm};

// Capabilities and their analysis
pub use crate::plugin::analyzer::PluginAnalyzer;
pub use crate::plugin::capability::{
    CapabilityCategory, CapabilityKind, CapabilitySet, CAPABILITY_CATALOG_VERSION,
};

// Catalog
pub use crate::plugin::registry::{AlgorithmListing, AlgorithmRegistry};

// Delivery of configuration values and result sinks
pub use crate::plugin::dispatch::{attach_result_sinks, dispatch_configuration, ConfigurationPair};

// Built-in algorithms
pub use crate::plugin::builtin::api::get_all_builtin_algorithms;
pub use crate::plugin::builtin::example_fd::ExampleFdAlgorithm;
pub use crate::plugin::builtin::example_ind_od::ExampleIndOdAlgorithm;
pub use crate::plugin::builtin::example_stats::ExampleStatsAlgorithm;
pub use crate::plugin::builtin::example_ucc::ExampleUccAlgorithm;
