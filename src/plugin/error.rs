//! Plugin Error Handling
//!
//! Errors raised while loading, configuring and running algorithms, and the
//! error type algorithms themselves return from setters and `execute()`.

use crate::core::error_handling::ContextualError;
use crate::plugin::capability::CapabilityKind;
use crate::receiver::ReceiverError;

/// Result type alias for plugin operations
pub type PluginResult<T> = std::result::Result<T, PluginError>;

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Algorithm not found: {plugin_name}")]
    PluginNotFound { plugin_name: String },

    #[error("Algorithm '{plugin_name}' is already registered")]
    AlreadyRegistered { plugin_name: String },

    #[error("Version incompatible: {message}")]
    VersionIncompatible { message: String },

    /// The algorithm cannot be instantiated or inspected
    #[error("Failed to load algorithm '{plugin_name}': {cause}")]
    LoadError { plugin_name: String, cause: String },

    #[error(
        "Algorithm '{plugin_name}' cannot take '{requirement}': missing capability '{}'",
        .capability.label()
    )]
    MissingCapability {
        plugin_name: String,
        requirement: String,
        capability: CapabilityKind,
    },

    /// A typed setter refused its value; the instance must be discarded
    #[error("Algorithm '{plugin_name}' rejected '{requirement}': {cause}")]
    ConfigurationRejected {
        plugin_name: String,
        requirement: String,
        cause: String,
    },

    #[error("Algorithm '{plugin_name}' failed during '{operation}': {cause}")]
    ExecutionError {
        plugin_name: String,
        operation: String,
        cause: String,
    },

    #[error("Algorithm '{plugin_name}' was cancelled")]
    Cancelled { plugin_name: String },
}

impl ContextualError for PluginError {
    fn is_user_actionable(&self) -> bool {
        !matches!(
            self,
            PluginError::LoadError { .. } | PluginError::ExecutionError { .. }
        )
    }

    fn user_message(&self) -> Option<String> {
        if self.is_user_actionable() {
            Some(self.to_string())
        } else {
            None
        }
    }
}

/// Error returned by algorithm code
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("invalid value for '{identifier}': {reason}")]
    Configuration { identifier: String, reason: String },

    #[error("{0}")]
    Execution(String),

    #[error(transparent)]
    Receiver(#[from] ReceiverError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AlgorithmError {
    pub fn configuration(identifier: &str, reason: impl Into<String>) -> Self {
        AlgorithmError::Configuration {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }

    pub fn execution(message: impl Into<String>) -> Self {
        AlgorithmError::Execution(message.into())
    }
}

pub type AlgorithmResult<T> = Result<T, AlgorithmError>;
