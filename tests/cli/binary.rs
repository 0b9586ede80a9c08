//! End-to-end tests of the `algohost` executable

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn algohost(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_algohost"))
        .args(["--no-color", "--log-level", "warn"])
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_list_shows_builtin_algorithms() {
    let output = algohost(&["list"]);

    assert!(output.status.success());
    let text = stdout(&output);
    for name in ["example-fd", "example-ind-od", "example-stats", "example-ucc"] {
        assert!(text.contains(name), "{} missing from:\n{}", name, text);
    }
}

#[test]
fn test_list_with_capability_filter() {
    let output = algohost(&["list", "--capability", "temp-file"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("example-stats"));
    assert!(!text.contains("example-fd"));
}

#[test]
fn test_describe_prints_requirements() {
    let output = algohost(&["describe", "example-ind-od"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["algorithm"], "example-ind-od");
    assert_eq!(json["requirements"][0]["identifier"], "connection");
    assert_eq!(json["requirements"][1]["identifier"], "tables");
}

#[test]
fn test_describe_unknown_algorithm_fails() {
    let output = algohost(&["describe", "tane"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_run_with_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("algohost.toml");
    fs::write(
        &config,
        r#"
        [algorithms.example-fd]
        table = "people"
        column = "column3"
        depth = 2
        "#,
    )
    .unwrap();

    let output = algohost(&["run", "example-fd", "-c", config.to_str().unwrap()]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let lines: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["type"], "functionalDependency");
}

#[test]
fn test_run_tsv_file_with_configured_format() {
    let dir = TempDir::new().unwrap();
    let tsv = dir.path().join("people.tsv");
    fs::write(&tsv, "id\tname\n1\tAda\n2\tAda\n").unwrap();
    let config = dir.path().join("algohost.toml");
    fs::write(
        &config,
        format!(
            "[algorithms.example-ucc]\ninput = '{}'\n\n[files.example-ucc.input]\nseparator = \"\\t\"\n",
            tsv.display()
        ),
    )
    .unwrap();

    let output = algohost(&["run", "example-ucc", "-c", config.to_str().unwrap()]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let text = stdout(&output);
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains(r#""columnIdentifier":"id""#), "{}", text);
    assert!(text.contains(r#""tableIdentifier":"people.tsv""#), "{}", text);
}

#[test]
fn test_run_into_results_dir() {
    let data = TempDir::new().unwrap();
    let csv = data.path().join("people.csv");
    fs::write(&csv, "id,name\n1,Ada\n2,Alan\n").unwrap();
    let results = TempDir::new().unwrap();
    let input = format!("example-ucc.input={}", csv.display());

    let output = algohost(&[
        "run",
        "example-ucc",
        "--set",
        &input,
        "--results-dir",
        results.path().to_str().unwrap(),
    ]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let files: Vec<String> = fs::read_dir(results.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("_uccs"));
}

#[test]
fn test_run_with_missing_input_fails() {
    let output = algohost(&["run", "example-fd", "--set", "example-fd.table=people"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_config_file_fails() {
    let output = algohost(&["list", "-c", "/nonexistent/algohost.toml"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}
