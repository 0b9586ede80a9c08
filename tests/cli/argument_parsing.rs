//! CLI argument parsing tests

use algohost::app::cli::args::*;
use algohost::plugin::api::CapabilityKind;
use clap::Parser;
use std::path::PathBuf;

fn argv(args: &[&str]) -> Vec<String> {
    std::iter::once("algohost")
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_global_options_before_and_after_subcommand() {
    let args = Args::parse_from_args(&argv(&[
        "--log-level",
        "debug",
        "list",
        "--log-format",
        "json",
        "-c",
        "host.toml",
    ]))
    .unwrap();

    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format.as_deref(), Some("json"));
    assert_eq!(args.config_file, Some(PathBuf::from("host.toml")));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    assert!(Args::parse_from_args(&argv(&["--log-level", "loud", "list"])).is_err());
    assert!(Args::parse_from_args(&argv(&["--log-format", "xml", "list"])).is_err());
}

#[test]
fn test_subcommand_is_required() {
    assert!(Args::try_parse_from(argv(&["--log-level", "info"])).is_err());
}

#[test]
fn test_list_capabilities_parse_as_kinds() {
    let args = Args::try_parse_from(argv(&[
        "list",
        "-k",
        "functional-dependency",
        "--capability",
        "string-parameter",
    ]))
    .unwrap();

    assert_eq!(
        args.command,
        Command::List {
            capabilities: vec![
                CapabilityKind::FunctionalDependency,
                CapabilityKind::StringParameter
            ],
            file_inputs: false,
        }
    );
}

#[test]
fn test_unknown_capability_is_rejected() {
    assert!(Args::try_parse_from(argv(&["list", "--capability", "teleportation"])).is_err());
}

#[test]
fn test_file_inputs_conflicts_with_capabilities() {
    let result = Args::try_parse_from(argv(&[
        "list",
        "--file-inputs",
        "--capability",
        "temp-file",
    ]));
    assert!(result.is_err());
}

#[test]
fn test_describe_takes_one_algorithm() {
    let args = Args::try_parse_from(argv(&["describe", "example-fd"])).unwrap();
    assert_eq!(
        args.command,
        Command::Describe {
            algorithm: "example-fd".to_string()
        }
    );
    assert!(Args::try_parse_from(argv(&["describe"])).is_err());
}

#[test]
fn test_run_collects_algorithms_and_overrides() {
    let args = Args::try_parse_from(argv(&[
        "run",
        "example-fd",
        "example-ucc",
        "--results-dir",
        "out",
        "-s",
        "example-fd.table=people",
        "--set",
        "example-ucc.input=people.csv",
    ]))
    .unwrap();

    match args.command {
        Command::Run {
            algorithms,
            results_dir,
            inputs,
        } => {
            assert_eq!(algorithms, vec!["example-fd", "example-ucc"]);
            assert_eq!(results_dir, Some(PathBuf::from("out")));
            assert_eq!(inputs.len(), 2);
        }
        other => panic!("expected run, got {:?}", other),
    }
}

#[test]
fn test_run_requires_an_algorithm() {
    assert!(Args::try_parse_from(argv(&["run", "--results-dir", "out"])).is_err());
}
