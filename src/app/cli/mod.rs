//! Command-line interface: arguments, configuration file, output and the
//! subcommand handlers

pub mod args;
pub mod commands;
pub mod config;
pub mod display;
