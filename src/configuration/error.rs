//! Configuration Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Wrong number of values for '{requirement}': {reason}")]
    Arity { requirement: String, reason: String },

    #[error("Cannot use '{input}' for '{requirement}': {reason}")]
    Coercion {
        requirement: String,
        input: String,
        reason: String,
    },

    #[error("Unknown configuration requirement '{identifier}'")]
    UnknownRequirement { identifier: String },

    #[error("Invalid requirement '{identifier}': {reason}")]
    InvalidRequirement { identifier: String, reason: String },
}

impl ContextualError for ConfigurationError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigurationError>;
