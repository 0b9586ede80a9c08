//! Plugin Analyzer
//!
//! Computes an algorithm's capability set by asking its `as_*` accessors once,
//! on a throwaway instance, and caches the answer by algorithm name. An
//! algorithm whose factory fails is reported as a load error and nothing is
//! cached for it, so "could not be analyzed" never looks like "has no
//! capabilities".

use crate::plugin::capability::{CapabilityKind, CapabilitySet};
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::traits::Algorithm;
use crate::plugin::types::DiscoveredAlgorithm;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct PluginAnalyzer {
    cache: RwLock<HashMap<String, CapabilitySet>>,
}

impl PluginAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capability set for `descriptor`, probing only on the first call
    pub fn analyze(&self, descriptor: &DiscoveredAlgorithm) -> PluginResult<CapabilitySet> {
        let name = descriptor.name();
        if let Some(capabilities) = self.cached(name) {
            return Ok(capabilities);
        }

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // another run may have finished probing while we waited for the lock
        if let Some(capabilities) = cache.get(name) {
            return Ok(capabilities.clone());
        }

        let mut instance = descriptor
            .instantiate()
            .map_err(|e| match e {
                PluginError::LoadError { .. } => e,
                other => PluginError::LoadError {
                    plugin_name: name.to_string(),
                    cause: other.to_string(),
                },
            })?;
        let capabilities = Self::inspect(instance.as_mut());
        log::debug!("Analyzed '{}': [{}]", name, capabilities);

        cache.insert(name.to_string(), capabilities.clone());
        Ok(capabilities)
    }

    /// False for unknown or not yet analyzed algorithms
    pub fn has_type(&self, name: &str, kind: CapabilityKind) -> bool {
        self.cached(name)
            .is_some_and(|capabilities| capabilities.satisfies(kind))
    }

    pub fn cached(&self, name: &str) -> Option<CapabilitySet> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn analyzed_count(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Ask every accessor of `algorithm` once
    pub fn inspect(algorithm: &mut dyn Algorithm) -> CapabilitySet {
        let mut capabilities = CapabilitySet::default();
        for kind in CapabilityKind::all() {
            let present = match kind {
                CapabilityKind::StringParameter => algorithm.as_string_parameter().is_some(),
                CapabilityKind::BooleanParameter => algorithm.as_boolean_parameter().is_some(),
                CapabilityKind::IntegerParameter => algorithm.as_integer_parameter().is_some(),
                CapabilityKind::ListBoxParameter => algorithm.as_list_box_parameter().is_some(),
                CapabilityKind::CheckBoxParameter => algorithm.as_check_box_parameter().is_some(),
                CapabilityKind::FileInputParameter => {
                    algorithm.as_file_input_parameter().is_some()
                }
                CapabilityKind::RelationalInputParameter => {
                    algorithm.as_relational_input_parameter().is_some()
                }
                CapabilityKind::TableInputParameter => {
                    algorithm.as_table_input_parameter().is_some()
                }
                CapabilityKind::DatabaseConnectionParameter => {
                    algorithm.as_database_connection_parameter().is_some()
                }
                CapabilityKind::FunctionalDependency => {
                    algorithm.as_functional_dependency().is_some()
                }
                CapabilityKind::InclusionDependency => algorithm.as_inclusion_dependency().is_some(),
                CapabilityKind::UniqueColumnCombination => {
                    algorithm.as_unique_column_combination().is_some()
                }
                CapabilityKind::ConditionalUniqueColumnCombination => {
                    algorithm.as_conditional_unique_column_combination().is_some()
                }
                CapabilityKind::OrderDependency => algorithm.as_order_dependency().is_some(),
                CapabilityKind::BasicStatistic => algorithm.as_basic_statistic().is_some(),
                CapabilityKind::TempFile => algorithm.as_temp_file().is_some(),
            };
            if present {
                capabilities.insert(kind);
            }
        }
        capabilities
    }
}
