//! Command-line arguments
//!
//! Global options control logging, color and the configuration file; the
//! subcommand selects what to do with the algorithm catalog.

use crate::plugin::api::CapabilityKind;
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "algohost")]
#[command(about = "Configure and run data profiling algorithms by capability")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        global = true,
        value_parser = ["trace", "debug", "info", "warn", "error", "off"]
    )]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(
        short = 'o',
        long = "log-format",
        value_name = "FORMAT",
        global = true,
        value_parser = ["text", "ext", "json"]
    )]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(short = 'g', long = "color", global = true, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true, conflicts_with = "color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List registered algorithms and their capabilities
    List {
        /// Only algorithms with every given capability
        #[arg(short = 'k', long = "capability", value_name = "KIND", action = ArgAction::Append)]
        capabilities: Vec<CapabilityKind>,

        /// Only algorithms that read files or relational inputs
        #[arg(long = "file-inputs", conflicts_with = "capabilities")]
        file_inputs: bool,
    },

    /// Print the configuration requirements of an algorithm as JSON
    Describe {
        /// Algorithm name
        algorithm: String,
    },

    /// Run algorithms with inputs from the configuration file
    Run {
        /// Algorithms to run in parallel
        #[arg(required = true, value_name = "ALGORITHM")]
        algorithms: Vec<String>,

        /// Write results as JSON lines into this directory
        #[arg(short = 'd', long = "results-dir", value_name = "DIR")]
        results_dir: Option<PathBuf>,

        /// Raw input overriding the configuration file*
        #[arg(
            short = 's',
            long = "set",
            value_name = "ALGORITHM.ID=VALUE",
            action = ArgAction::Append
        )]
        inputs: Vec<String>,
    },
}

impl Args {
    /// Parse `argv`, styling help and errors according to the color flags
    pub fn parse_from_args(argv: &[String]) -> Result<Self, clap::Error> {
        let color = Self::color_flag(argv);
        let mut command = Self::command()
            .styles(crate::core::styles::palette_to_clap(color != Some(false)))
            .color(match color {
                Some(true) => clap::ColorChoice::Always,
                Some(false) => clap::ColorChoice::Never,
                None => clap::ColorChoice::Auto,
            });
        let matches = command.try_get_matches_from_mut(argv)?;
        let mut args = Self::from_arg_matches(&matches)?;

        if let Some(path) = &args.log_file {
            let name = path.to_string_lossy();
            if name.eq_ignore_ascii_case("none") || name == "-" {
                args.log_file = None;
            }
        }
        Ok(args)
    }

    /// `Some(true)` for --color, `Some(false)` for --no-color, `None` for auto
    pub fn color_choice(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Whether output should be colored, given the configured fallback
    pub fn use_color(&self, configured: Option<bool>) -> bool {
        self.color_choice()
            .or(configured)
            .unwrap_or_else(|| std::io::stdout().is_terminal())
    }

    // Color flags must be known before clap builds its help output
    fn color_flag(argv: &[String]) -> Option<bool> {
        argv.iter().rev().find_map(|arg| match arg.as_str() {
            "--color" | "-g" => Some(true),
            "--no-color" => Some(false),
            _ => None,
        })
    }
}

/// One `--set ALGORITHM.ID=VALUE` override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOverride {
    pub algorithm: String,
    pub identifier: String,
    pub value: String,
}

impl InputOverride {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (target, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected ALGORITHM.ID=VALUE, got '{}'", raw))?;
        let (algorithm, identifier) = target
            .split_once('.')
            .ok_or_else(|| format!("expected ALGORITHM.ID before '=', got '{}'", target))?;
        if algorithm.is_empty() || identifier.is_empty() {
            return Err(format!("empty algorithm or identifier in '{}'", raw));
        }
        Ok(Self {
            algorithm: algorithm.to_string(),
            identifier: identifier.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_log_file_none_disables_file_logging() {
        let args = Args::parse_from_args(&argv(&["algohost", "-f", "none", "list"])).unwrap();
        assert_eq!(args.log_file, None);

        let args = Args::parse_from_args(&argv(&["algohost", "list", "-f", "algohost.log"])).unwrap();
        assert_eq!(args.log_file, Some(PathBuf::from("algohost.log")));
    }

    #[test]
    fn test_color_flags_conflict() {
        let result = Args::parse_from_args(&argv(&["algohost", "--color", "--no-color", "list"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_color_choice() {
        let args = Args::parse_from_args(&argv(&["algohost", "--no-color", "list"])).unwrap();
        assert_eq!(args.color_choice(), Some(false));
        assert!(!args.use_color(Some(true)));

        let args = Args::parse_from_args(&argv(&["algohost", "list"])).unwrap();
        assert_eq!(args.color_choice(), None);
        assert!(args.use_color(Some(true)));
    }

    #[test]
    fn test_input_override() {
        let parsed = InputOverride::parse("example-fd.threshold=0.5").unwrap();
        assert_eq!(parsed.algorithm, "example-fd");
        assert_eq!(parsed.identifier, "threshold");
        assert_eq!(parsed.value, "0.5");

        let parsed = InputOverride::parse("example-stats.files=data/a=b.csv").unwrap();
        assert_eq!(parsed.value, "data/a=b.csv");

        assert!(InputOverride::parse("example-fd=3").is_err());
        assert!(InputOverride::parse("example-fd.threshold").is_err());
        assert!(InputOverride::parse(".threshold=3").is_err());
    }
}
