//! Type definitions for the plugin system

use crate::core::version::major_version;
use crate::plugin::error::PluginResult;
use crate::plugin::traits::Algorithm;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Algorithm metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub authors: Vec<String>,
    pub api_version: u32,
}

impl AlgorithmInfo {
    /// Same-year API versions are compatible
    pub fn is_compatible(&self, system_api_version: u32) -> bool {
        major_version(self.api_version) == major_version(system_api_version)
    }
}

/// Creates fresh algorithm instances; every run gets its own
pub type AlgorithmFactory = Arc<dyn Fn() -> PluginResult<Box<dyn Algorithm>> + Send + Sync>;

/// Discovery result with algorithm metadata and its factory
#[derive(Clone)]
pub struct DiscoveredAlgorithm {
    pub info: AlgorithmInfo,
    pub factory: AlgorithmFactory,
}

impl DiscoveredAlgorithm {
    pub fn new<F>(info: AlgorithmInfo, factory: F) -> Self
    where
        F: Fn() -> PluginResult<Box<dyn Algorithm>> + Send + Sync + 'static,
    {
        Self {
            info,
            factory: Arc::new(factory),
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn instantiate(&self) -> PluginResult<Box<dyn Algorithm>> {
        (self.factory)()
    }
}

impl fmt::Debug for DiscoveredAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveredAlgorithm")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}
