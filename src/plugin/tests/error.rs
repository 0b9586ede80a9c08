//! Tests for plugin error handling

use crate::core::error_handling::ContextualError;
use crate::plugin::capability::CapabilityKind;
use crate::plugin::error::*;
use crate::receiver::ReceiverError;

#[test]
fn test_version_incompatible_error() {
    let error = PluginError::VersionIncompatible {
        message: "'fdep' targets API 20240101 but this host provides 20250727".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Version incompatible: 'fdep' targets API 20240101 but this host provides 20250727"
    );
}

#[test]
fn test_load_error() {
    let error = PluginError::LoadError {
        plugin_name: "tane".to_string(),
        cause: "missing native library".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Failed to load algorithm 'tane': missing native library"
    );
    assert!(!error.is_user_actionable());
    assert!(error.user_message().is_none());
}

#[test]
fn test_missing_capability_names_the_capability() {
    let error = PluginError::MissingCapability {
        plugin_name: "fd-only".to_string(),
        requirement: "dbConn".to_string(),
        capability: CapabilityKind::DatabaseConnectionParameter,
    };

    assert_eq!(
        error.to_string(),
        "Algorithm 'fd-only' cannot take 'dbConn': missing capability 'accepts database connection'"
    );
    assert!(error.is_user_actionable());
}

#[test]
fn test_configuration_rejected_error() {
    let error = PluginError::ConfigurationRejected {
        plugin_name: "tane".to_string(),
        requirement: "maxLhs".to_string(),
        cause: "must be positive".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Algorithm 'tane' rejected 'maxLhs': must be positive"
    );
    assert_eq!(error.user_message(), Some(error.to_string()));
}

#[test]
fn test_algorithm_error_wraps_receiver_errors() {
    let error: AlgorithmError = ReceiverError::Cancelled.into();
    assert!(matches!(error, AlgorithmError::Receiver(ReceiverError::Cancelled)));

    let error = AlgorithmError::configuration("depth", "too deep");
    assert_eq!(error.to_string(), "invalid value for 'depth': too deep");
}
