//! Example unique column combination algorithm
//!
//! Reads each relational file input and reports every single column whose
//! values are unique. For the first non-unique column it also looks for a
//! condition on another column under which that column becomes unique.
//! Table inputs are accepted but not read.

use crate::builtin;
use crate::configuration::{ConfigResult, ConfigurationRequirement, RelationalInputSetting};
use crate::plugin::builtin::csv::{read_records, Records};
use crate::plugin::builtin::{emit, not_configured, unknown_identifier};
use crate::plugin::error::{AlgorithmError, AlgorithmResult, PluginResult};
use crate::plugin::traits::{
    Algorithm, ConditionalUniqueColumnCombinationAlgorithm, RelationalInputParameterAlgorithm,
    UniqueColumnCombinationAlgorithm,
};
use crate::plugin::types::{AlgorithmInfo, DiscoveredAlgorithm};
use crate::receiver::{ConditionalUniqueColumnCombinationSink, UniqueColumnCombinationSink};
use crate::results::{
    ColumnCombination, ColumnCondition, ColumnIdentifier, ConditionalUniqueColumnCombination,
    UniqueColumnCombination,
};
use std::collections::{BTreeSet, HashSet};

builtin!(|| DiscoveredAlgorithm::new(
    ExampleUccAlgorithm::static_info(),
    ExampleUccAlgorithm::create
));

pub const INPUT_IDENTIFIER: &str = "input";

#[derive(Debug, Default)]
pub struct ExampleUccAlgorithm {
    inputs: Vec<RelationalInputSetting>,
    ucc_sink: Option<UniqueColumnCombinationSink>,
    cucc_sink: Option<ConditionalUniqueColumnCombinationSink>,
}

impl ExampleUccAlgorithm {
    pub fn static_info() -> AlgorithmInfo {
        AlgorithmInfo {
            name: "example-ucc".to_string(),
            version: "1.0.0".to_string(),
            description: "Finds unique single columns and one conditional unique column"
                .to_string(),
            authors: vec!["algohost".to_string()],
            api_version: crate::core::version::get_api_version(),
        }
    }

    pub fn create() -> PluginResult<Box<dyn Algorithm>> {
        Ok(Box::new(Self::default()))
    }
}

fn is_unique<'a>(values: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = HashSet::new();
    values.into_iter().all(|value| seen.insert(value))
}

fn unique_columns(table: &str, records: &Records) -> Vec<UniqueColumnCombination> {
    records
        .columns
        .iter()
        .enumerate()
        .filter(|(index, _)| is_unique(records.rows.iter().map(|row| row[*index].as_str())))
        .map(|(_, column)| {
            UniqueColumnCombination::new(ColumnCombination::new([ColumnIdentifier::new(
                table, column,
            )]))
        })
        .collect()
}

/// First `column = value` condition making a non-unique column unique on at
/// least two rows
fn conditional_unique(table: &str, records: &Records) -> Option<ConditionalUniqueColumnCombination> {
    let total = records.rows.len();
    let target = (0..records.columns.len())
        .find(|index| !is_unique(records.rows.iter().map(|row| row[*index].as_str())))?;

    for condition_column in (0..records.columns.len()).filter(|index| *index != target) {
        let values: BTreeSet<&str> = records
            .rows
            .iter()
            .map(|row| row[condition_column].as_str())
            .collect();

        for value in values {
            let matching: Vec<&Vec<String>> = records
                .rows
                .iter()
                .filter(|row| row[condition_column] == value)
                .collect();
            if matching.len() < 2 || !is_unique(matching.iter().map(|row| row[target].as_str())) {
                continue;
            }

            // at least two matching rows out of `total`, so always a fraction
            return ConditionalUniqueColumnCombination::new(
                ColumnCombination::new([ColumnIdentifier::new(table, &records.columns[target])]),
                ColumnCondition::equals(
                    ColumnIdentifier::new(table, &records.columns[condition_column]),
                    value,
                ),
                matching.len() as f64 / total as f64,
            )
            .ok();
        }
    }
    None
}

impl Algorithm for ExampleUccAlgorithm {
    fn info(&self) -> AlgorithmInfo {
        Self::static_info()
    }

    fn configuration_requirements(&self) -> ConfigResult<Vec<ConfigurationRequirement>> {
        Ok(vec![
            ConfigurationRequirement::relational_input(INPUT_IDENTIFIER)?.with_arity(1, None)?,
        ])
    }

    fn execute(&mut self) -> AlgorithmResult<()> {
        if self.inputs.is_empty() {
            return Err(not_configured(INPUT_IDENTIFIER));
        }
        let ucc_sink = self
            .ucc_sink
            .as_ref()
            .ok_or_else(|| not_configured("unique column combination receiver"))?;

        for input in &self.inputs {
            let file = match input {
                RelationalInputSetting::File(file) => file,
                RelationalInputSetting::Table(table) => {
                    log::info!("example-ucc does not read table '{}', skipping", table.table);
                    continue;
                }
            };

            let records = read_records(file).map_err(|e| {
                AlgorithmError::execution(format!("cannot read {}: {}", file.path.display(), e))
            })?;
            let table = file.table_name();

            for ucc in unique_columns(&table, &records) {
                emit(ucc_sink, ucc)?;
            }

            if let (Some(sink), Some(cucc)) =
                (self.cucc_sink.as_ref(), conditional_unique(&table, &records))
            {
                emit(sink, cucc)?;
            }
        }
        Ok(())
    }

    fn as_relational_input_parameter(
        &mut self,
    ) -> Option<&mut dyn RelationalInputParameterAlgorithm> {
        Some(self)
    }

    fn as_unique_column_combination(
        &mut self,
    ) -> Option<&mut dyn UniqueColumnCombinationAlgorithm> {
        Some(self)
    }

    fn as_conditional_unique_column_combination(
        &mut self,
    ) -> Option<&mut dyn ConditionalUniqueColumnCombinationAlgorithm> {
        Some(self)
    }
}

impl RelationalInputParameterAlgorithm for ExampleUccAlgorithm {
    fn set_relational_input_configuration_value(
        &mut self,
        identifier: &str,
        inputs: &[RelationalInputSetting],
    ) -> AlgorithmResult<()> {
        if identifier != INPUT_IDENTIFIER {
            return Err(unknown_identifier(identifier));
        }
        self.inputs = inputs.to_vec();
        Ok(())
    }
}

impl UniqueColumnCombinationAlgorithm for ExampleUccAlgorithm {
    fn set_unique_column_combination_receiver(&mut self, sink: UniqueColumnCombinationSink) {
        self.ucc_sink = Some(sink);
    }
}

impl ConditionalUniqueColumnCombinationAlgorithm for ExampleUccAlgorithm {
    fn set_conditional_unique_column_combination_receiver(
        &mut self,
        sink: ConditionalUniqueColumnCombinationSink,
    ) {
        self.cucc_sink = Some(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::FileInputSetting;
    use crate::core::shutdown::CancellationFlag;
    use crate::receiver::ResultCache;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn records(columns: &[&str], rows: &[&[&str]]) -> Records {
        Records {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_unique_columns() {
        let data = records(
            &["id", "city"],
            &[&["1", "Berlin"], &["2", "Berlin"], &["3", "Potsdam"]],
        );

        let names: Vec<String> = unique_columns("people", &data)
            .iter()
            .map(|ucc| ucc.to_string())
            .collect();
        assert_eq!(names, vec!["[people.id]"]);
    }

    #[test]
    fn test_conditional_unique_column() {
        let data = records(
            &["name", "country"],
            &[
                &["Ada", "UK"],
                &["Alan", "UK"],
                &["Ada", "US"],
                &["Ada", "NZ"],
            ],
        );

        let cucc = conditional_unique("people", &data).unwrap();
        assert_eq!(cucc.to_string(), "[people.name] | people.country=UK (coverage 0.5)");
    }

    #[test]
    fn test_no_condition_for_all_unique_input() {
        let data = records(&["id"], &[&["1"], &["2"]]);
        assert!(conditional_unique("t", &data).is_none());
    }

    #[test]
    fn test_quoted_separators_keep_values_apart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cities.csv");
        fs::write(
            &path,
            "city,zip\n\"Paris, TX\",75460\n\"Paris, FR\",75001\n\"Paris, TN\",38242\n",
        )
        .unwrap();
        let cache = Arc::new(Mutex::new(ResultCache::new()));
        let mut algorithm = ExampleUccAlgorithm::default();
        algorithm
            .set_relational_input_configuration_value(
                INPUT_IDENTIFIER,
                &[RelationalInputSetting::File(FileInputSetting::new(path))],
            )
            .unwrap();
        algorithm.set_unique_column_combination_receiver(UniqueColumnCombinationSink::new(
            cache.clone(),
            CancellationFlag::new(),
        ));

        algorithm.execute().unwrap();

        let results: Vec<String> = cache
            .lock()
            .unwrap()
            .fetch_new_results()
            .iter()
            .map(|result| result.to_string())
            .collect();
        assert_eq!(results, vec!["[cities.csv.city]", "[cities.csv.zip]"]);
    }
}
