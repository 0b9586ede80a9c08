//! Algorithm Registry
//!
//! Holds the discovered algorithms by name and answers catalog queries.
//! Multi-capability queries use AND semantics: an algorithm is listed only
//! when it satisfies every requested capability.

use crate::core::version::get_api_version;
use crate::plugin::analyzer::PluginAnalyzer;
use crate::plugin::builtin::api::get_all_builtin_algorithms;
use crate::plugin::capability::{CapabilityKind, CapabilitySet};
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::types::{AlgorithmInfo, DiscoveredAlgorithm};
use std::collections::BTreeMap;

/// One catalog row
#[derive(Debug, Clone)]
pub struct AlgorithmListing {
    pub info: AlgorithmInfo,
    pub capabilities: CapabilitySet,
}

#[derive(Debug)]
pub struct AlgorithmRegistry {
    algorithms: BTreeMap<String, DiscoveredAlgorithm>,
    system_api_version: u32,
}

impl AlgorithmRegistry {
    /// Create a new empty registry for the running API version
    pub fn new() -> Self {
        Self::with_api_version(get_api_version())
    }

    pub fn with_api_version(system_api_version: u32) -> Self {
        Self {
            algorithms: BTreeMap::new(),
            system_api_version,
        }
    }

    /// Registry holding every algorithm compiled into this binary. Built-ins
    /// that fail registration are logged and skipped.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for discovered in get_all_builtin_algorithms() {
            let name = discovered.info.name.clone();
            if let Err(e) = registry.register(discovered) {
                log::warn!("Skipping built-in algorithm '{}': {}", name, e);
            }
        }
        log::debug!("Registered {} built-in algorithms", registry.len());
        registry
    }

    /// Register an algorithm after checking its API version
    pub fn register(&mut self, discovered: DiscoveredAlgorithm) -> PluginResult<()> {
        let plugin_name = discovered.info.name.clone();

        if !discovered.info.is_compatible(self.system_api_version) {
            return Err(PluginError::VersionIncompatible {
                message: format!(
                    "'{}' targets API {} but this host provides {}",
                    plugin_name, discovered.info.api_version, self.system_api_version
                ),
            });
        }

        if self.algorithms.contains_key(&plugin_name) {
            return Err(PluginError::AlreadyRegistered { plugin_name });
        }

        self.algorithms.insert(plugin_name, discovered);
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> PluginResult<DiscoveredAlgorithm> {
        self.algorithms
            .remove(name)
            .ok_or_else(|| PluginError::PluginNotFound {
                plugin_name: name.to_string(),
            })
    }

    pub fn get(&self, name: &str) -> PluginResult<&DiscoveredAlgorithm> {
        self.algorithms
            .get(name)
            .ok_or_else(|| PluginError::PluginNotFound {
                plugin_name: name.to_string(),
            })
    }

    pub fn has_algorithm(&self, name: &str) -> bool {
        self.algorithms.contains_key(name)
    }

    /// Sorted algorithm names
    pub fn names(&self) -> Vec<String> {
        self.algorithms.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Algorithms satisfying every capability in `required`; all algorithms
    /// when `required` is empty. Algorithms that cannot be analyzed are left
    /// out.
    pub fn list_algorithms(
        &self,
        analyzer: &PluginAnalyzer,
        required: &[CapabilityKind],
    ) -> Vec<AlgorithmListing> {
        self.algorithms
            .values()
            .filter_map(|discovered| match analyzer.analyze(discovered) {
                Ok(capabilities) => Some(AlgorithmListing {
                    info: discovered.info.clone(),
                    capabilities,
                }),
                Err(e) => {
                    log::warn!("Cannot list '{}': {}", discovered.name(), e);
                    None
                }
            })
            .filter(|listing| listing.capabilities.satisfies_all(required))
            .collect()
    }

    /// Algorithms reading files directly or through a relational input
    pub fn algorithms_for_file_inputs(&self, analyzer: &PluginAnalyzer) -> Vec<AlgorithmListing> {
        self.list_algorithms(analyzer, &[])
            .into_iter()
            .filter(|listing| {
                listing
                    .capabilities
                    .satisfies(CapabilityKind::FileInputParameter)
                    || listing
                        .capabilities
                        .satisfies(CapabilityKind::RelationalInputParameter)
            })
            .collect()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_registered() {
        let registry = AlgorithmRegistry::with_builtins();

        assert_eq!(
            registry.names(),
            vec!["example-fd", "example-ind-od", "example-stats", "example-ucc"]
        );
        assert!(registry.get("example-fd").is_ok());
        assert!(matches!(
            registry.get("nope"),
            Err(PluginError::PluginNotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = AlgorithmRegistry::with_builtins();
        let again = registry.get("example-fd").unwrap().clone();

        assert!(matches!(
            registry.register(again),
            Err(PluginError::AlreadyRegistered { .. })
        ));
    }

    #[test]
    fn test_other_api_year_is_rejected() {
        let mut registry = AlgorithmRegistry::with_api_version(20250727);
        let mut discovered = AlgorithmRegistry::with_builtins()
            .unregister("example-fd")
            .unwrap();
        discovered.info.api_version = 20240101;

        assert!(matches!(
            registry.register(discovered),
            Err(PluginError::VersionIncompatible { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_capability_queries_use_and_semantics() {
        let registry = AlgorithmRegistry::with_builtins();
        let analyzer = PluginAnalyzer::new();

        assert_eq!(registry.list_algorithms(&analyzer, &[]).len(), 4);

        let fd_producers = registry.list_algorithms(&analyzer, &[CapabilityKind::FunctionalDependency]);
        let names: Vec<&str> = fd_producers.iter().map(|l| l.info.name.as_str()).collect();
        assert_eq!(names, vec!["example-fd"]);

        let both = registry.list_algorithms(
            &analyzer,
            &[
                CapabilityKind::FunctionalDependency,
                CapabilityKind::BasicStatistic,
            ],
        );
        assert!(both.is_empty());
    }

    #[test]
    fn test_file_input_query_is_a_union() {
        let registry = AlgorithmRegistry::with_builtins();
        let analyzer = PluginAnalyzer::new();

        let names: Vec<String> = registry
            .algorithms_for_file_inputs(&analyzer)
            .into_iter()
            .map(|l| l.info.name)
            .collect();
        assert_eq!(names, vec!["example-stats", "example-ucc"]);
    }
}
