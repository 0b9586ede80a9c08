//! CLI TOML configuration tests
//!
//! Loading the configuration file and combining it with command-line input
//! overrides.

use algohost::app::cli::args::InputOverride;
use algohost::app::cli::config::{AppConfig, ConfigFileError};
use algohost::configuration::ConnectionCatalog;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;
use toml::Table;

const HOST_CONFIG: &str = r#"
log-level = "warn"
results-dir = "results"

[schema]
columns = ["people.column1", "people.column2"]

[connections.warehouse]
url = "localhost:5432/warehouse"
username = "profiler"
password = "secret"
system = "postgresql"

[algorithms.example-fd]
table = "people"
column = "column2"

[algorithms.example-ind-od]
connection = "warehouse"
tables = ["warehouse#customers", "warehouse#orders"]
"#;

#[tokio::test]
async fn test_load_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("algohost.toml");
    fs::write(&path, HOST_CONFIG).unwrap();

    let config = AppConfig::load(Some(path.as_path())).await.unwrap();

    assert_eq!(config.log_level.as_deref(), Some("warn"));
    assert!(config.connections.lookup("warehouse").is_some());
    assert_eq!(config.schema().unwrap().unwrap().len(), 2);

    let request = config.request_for("example-ind-od", &[]);
    assert_eq!(request.raw("tables").len(), 2);
    assert_eq!(request.raw("connection"), ["warehouse".to_string()]);
}

#[test]
fn test_apply_toml_values_from_table() {
    let mut config = AppConfig::default();
    let mut table = Table::new();
    table.insert("color".to_string(), toml::Value::Boolean(true));
    table.insert(
        "log-file".to_string(),
        toml::Value::String("algohost.log".to_string()),
    );

    config.apply_toml_values(&table).unwrap();

    assert_eq!(config.color, Some(true));
    assert_eq!(
        config.log_file.as_deref(),
        Some(std::path::Path::new("algohost.log"))
    );
}

#[test]
fn test_wrong_value_type_is_rejected() {
    let mut config = AppConfig::default();
    let mut table = Table::new();
    table.insert("color".to_string(), toml::Value::String("yes".to_string()));

    let error = config.apply_toml_values(&table).unwrap_err();
    assert!(matches!(error, ConfigFileError::Invalid { ref key, .. } if key == "color"));
}

#[test]
fn test_command_line_overrides_configured_inputs() {
    let mut config = AppConfig::default();
    config
        .apply_toml_values(&toml::from_str(HOST_CONFIG).unwrap())
        .unwrap();
    let overrides = [InputOverride::parse("example-fd.column=column3").unwrap()];

    let request = config.request_for("example-fd", &overrides);

    assert_eq!(request.raw("table"), ["people".to_string()]);
    assert_eq!(request.raw("column"), ["column3".to_string()]);
}

#[test]
fn test_unconfigured_algorithm_gets_only_overrides() {
    let overrides = [InputOverride::parse("example-ucc.input=data/*.csv").unwrap()];

    let request = AppConfig::default().request_for("example-ucc", &overrides);

    assert_eq!(request.algorithm(), "example-ucc");
    assert_eq!(request.inputs().len(), 1);
    assert_eq!(request.raw("input"), ["data/*.csv".to_string()]);
}

#[cfg(target_os = "linux")]
#[tokio::test]
#[serial]
async fn test_default_file_is_loaded_from_config_dir() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("Algohost");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("algohost.toml"), "log-format = \"ext\"\n").unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", dir.path());
    let config = AppConfig::load(None).await;
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(config.unwrap().log_format.as_deref(), Some("ext"));
}

#[cfg(target_os = "linux")]
#[tokio::test]
#[serial]
async fn test_missing_default_file_gives_defaults() {
    let dir = TempDir::new().unwrap();

    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", dir.path());
    let config = AppConfig::load(None).await;
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    let config = config.unwrap();
    assert!(config.log_level.is_none());
    assert!(config.algorithms.is_empty());
}
