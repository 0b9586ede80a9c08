//! Execution Error Handling

use crate::configuration::ConfigurationError;
use crate::core::error_handling::ContextualError;
use crate::plugin::error::PluginError;
use crate::receiver::ReceiverError;

pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;

/// Anything that can stop one algorithm run
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Receiver(#[from] ReceiverError),

    #[error("Cannot create scratch directory for '{algorithm}': {source}")]
    Scratch {
        algorithm: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Run of '{algorithm}' was aborted: {reason}")]
    Aborted { algorithm: String, reason: String },
}

impl ContextualError for ExecutionError {
    fn is_user_actionable(&self) -> bool {
        match self {
            ExecutionError::Configuration(e) => e.is_user_actionable(),
            ExecutionError::Plugin(e) => e.is_user_actionable(),
            ExecutionError::Receiver(e) => e.is_user_actionable(),
            ExecutionError::Scratch { .. } | ExecutionError::Aborted { .. } => false,
        }
    }

    fn user_message(&self) -> Option<String> {
        match self {
            ExecutionError::Configuration(e) => e.user_message(),
            ExecutionError::Plugin(e) => e.user_message(),
            ExecutionError::Receiver(e) => e.user_message(),
            ExecutionError::Scratch { .. } | ExecutionError::Aborted { .. } => None,
        }
    }
}
