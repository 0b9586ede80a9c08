//! Generic error handling utilities
//!
//! Provides unified error logging that works across the configuration,
//! plugin, receiver and execution error types while keeping their
//! domain-specific messages.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// User-actionable errors (bad configuration values, unknown algorithm names,
/// missing capabilities) show their specific message. System errors (receiver
/// storage failures, plugin load failures) show the operation context and keep
/// the details at debug level.
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message the user can act on directly
    fn is_user_actionable(&self) -> bool;

    /// The specific user message when this is a user-actionable error
    fn user_message(&self) -> Option<String>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// # Examples
/// ```rust,no_run
/// # use algohost::core::error_handling::log_error_with_context;
/// # use algohost::configuration::ConfigurationError;
/// let err = ConfigurationError::Coercion {
///     requirement: "threshold".to_string(),
///     input: "maybe".to_string(),
///     reason: "expected a boolean".to_string(),
/// };
/// log_error_with_context(&err, "Building configuration");
/// // Logs: "FATAL: Cannot use 'maybe' for 'threshold': expected a boolean"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Log an error that only affects a single item and does not stop the run
pub fn log_recoverable_error<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => {
            log::warn!("{}: {}", operation_context, user_msg)
        }
        _ => log::warn!("{}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct TestUserError {
        message: String,
    }

    impl fmt::Display for TestUserError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl std::error::Error for TestUserError {}

    impl ContextualError for TestUserError {
        fn is_user_actionable(&self) -> bool {
            true
        }

        fn user_message(&self) -> Option<String> {
            Some(self.message.clone())
        }
    }

    #[derive(Debug)]
    struct TestSystemError {
        internal_details: String,
    }

    impl fmt::Display for TestSystemError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "System error: {}", self.internal_details)
        }
    }

    impl std::error::Error for TestSystemError {}

    impl ContextualError for TestSystemError {
        fn is_user_actionable(&self) -> bool {
            false
        }

        fn user_message(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_user_actionable_error_shows_specific_message() {
        let error = TestUserError {
            message: "Unknown choice 'x'".to_string(),
        };

        assert!(error.is_user_actionable());
        assert_eq!(error.user_message().as_deref(), Some("Unknown choice 'x'"));
        log_error_with_context(&error, "Building configuration");
    }

    #[test]
    fn test_system_error_uses_generic_context() {
        let error = TestSystemError {
            internal_details: "disk full".to_string(),
        };

        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
        log_recoverable_error(&error, "Writing result");
    }
}
