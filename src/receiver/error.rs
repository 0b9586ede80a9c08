//! Receiver Error Types

use crate::core::error_handling::ContextualError;
use crate::results::ResultType;

#[derive(Debug, thiserror::Error)]
pub enum ReceiverError {
    #[error("Could not receive result: {reason}")]
    CouldNotReceiveResult { reason: String },

    #[error("Result {result} references columns outside the input schema: {columns}")]
    ColumnNameMismatch { result: String, columns: String },

    #[error("Result delivery cancelled")]
    Cancelled,
}

impl ReceiverError {
    pub(crate) fn storage(result_type: ResultType, error: impl std::fmt::Display) -> Self {
        ReceiverError::CouldNotReceiveResult {
            reason: format!("{} result: {}", result_type, error),
        }
    }
}

impl ContextualError for ReceiverError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            ReceiverError::ColumnNameMismatch { .. } | ReceiverError::Cancelled
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

/// Result type for receiver operations
pub type ReceiverResult<T> = Result<T, ReceiverError>;
