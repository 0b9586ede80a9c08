//! Tables and JSON printed by the subcommands

use crate::configuration::ConfigurationRequirement;
use crate::core::styles::StyleRole;
use crate::execution::{ExecutionReport, ExecutionResult};
use crate::plugin::api::{AlgorithmInfo, AlgorithmListing, CapabilityCategory, CapabilitySet};
use prettytable::{format, Cell, Row, Table};
use serde_json::json;

fn cell(text: &str, role: StyleRole, use_color: bool) -> Cell {
    Cell::new(text).style_spec(&role.cell_spec(use_color))
}

fn titles(names: &[&str], use_color: bool) -> Row {
    let spec = if use_color {
        format!("b{}", StyleRole::Header.cell_spec(true))
    } else {
        String::new()
    };
    Row::new(
        names
            .iter()
            .map(|name| Cell::new(name).style_spec(&spec))
            .collect(),
    )
}

fn capability_names(capabilities: &CapabilitySet, category: CapabilityCategory) -> String {
    capabilities
        .in_category(category)
        .map(|kind| kind.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One row per algorithm with its capabilities grouped by category
pub fn algorithm_table(listings: &[AlgorithmListing], use_color: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(titles(
        &["Algorithm", "Version", "Configuration", "Results", "Resources", "Description"],
        use_color,
    ));

    for listing in listings {
        let caps = &listing.capabilities;
        table.add_row(Row::new(vec![
            cell(&listing.info.name, StyleRole::Name, use_color),
            cell(&listing.info.version, StyleRole::Dim, use_color),
            cell(
                &capability_names(caps, CapabilityCategory::Configuration),
                StyleRole::Parameter,
                use_color,
            ),
            cell(
                &capability_names(caps, CapabilityCategory::Result),
                StyleRole::Result,
                use_color,
            ),
            cell(
                &capability_names(caps, CapabilityCategory::Resource),
                StyleRole::Dim,
                use_color,
            ),
            cell(&listing.info.description, StyleRole::Value, use_color),
        ]));
    }
    table
}

/// Requirement descriptions of one algorithm as pretty JSON
pub fn requirements_json(
    info: &AlgorithmInfo,
    requirements: &[ConfigurationRequirement],
) -> Result<String, serde_json::Error> {
    let descriptions: Vec<_> = requirements.iter().map(|r| r.describe()).collect();
    serde_json::to_string_pretty(&json!({
        "algorithm": info.name,
        "version": info.version,
        "requirements": descriptions,
    }))
}

/// Summary of a batch of runs, in request order
pub fn report_table(outcomes: &[(String, ExecutionResult<ExecutionReport>)], use_color: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(titles(
        &["Algorithm", "Execution", "Accepted", "Rejected", "Time (ms)", "Status"],
        use_color,
    ));

    for (algorithm, outcome) in outcomes {
        let row = match outcome {
            Ok(report) => vec![
                cell(algorithm, StyleRole::Name, use_color),
                cell(&report.execution_id, StyleRole::Dim, use_color),
                cell(&report.accepted.to_string(), StyleRole::Value, use_color),
                cell(
                    &report.rejected.to_string(),
                    if report.rejected > 0 {
                        StyleRole::Invalid
                    } else {
                        StyleRole::Value
                    },
                    use_color,
                ),
                cell(&report.elapsed.as_millis().to_string(), StyleRole::Value, use_color),
                cell("ok", StyleRole::Valid, use_color),
            ],
            Err(error) => vec![
                cell(algorithm, StyleRole::Name, use_color),
                cell("-", StyleRole::Dim, use_color),
                cell("-", StyleRole::Dim, use_color),
                cell("-", StyleRole::Dim, use_color),
                cell("-", StyleRole::Dim, use_color),
                cell(&error.to_string(), StyleRole::Error, use_color),
            ],
        };
        table.add_row(Row::new(row));
    }
    table
}
