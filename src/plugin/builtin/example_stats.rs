//! Example basic statistics algorithm
//!
//! Computes the selected per-column statistics over every file input. When a
//! scratch directory is provided, the sorted distinct values of each column
//! are spilled to it before counting, one `<file>-<column>.distinct` file per
//! column named by position.

use crate::builtin;
use crate::configuration::{
    ConfigResult, ConfigurationRequirement, FileInputSetting, RequirementKind,
};
use crate::plugin::builtin::csv::{read_records, Records};
use crate::plugin::builtin::{emit, not_configured, unknown_identifier};
use crate::plugin::error::{AlgorithmError, AlgorithmResult, PluginResult};
use crate::plugin::traits::{
    Algorithm, BasicStatisticAlgorithm, CheckBoxParameterAlgorithm, FileInputParameterAlgorithm,
    TempFileAlgorithm,
};
use crate::plugin::types::{AlgorithmInfo, DiscoveredAlgorithm};
use crate::receiver::BasicStatisticSink;
use crate::results::{BasicStatistic, BasicStatisticValue, ColumnCombination, ColumnIdentifier};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

builtin!(|| DiscoveredAlgorithm::new(
    ExampleStatsAlgorithm::static_info(),
    ExampleStatsAlgorithm::create
));

pub const FILES_IDENTIFIER: &str = "files";
pub const STATISTICS_IDENTIFIER: &str = "statistics";

pub const NUMBER_OF_ROWS: &str = "Number of Rows";
pub const NULLS: &str = "Nulls";
pub const NUMBER_OF_DISTINCT_VALUES: &str = "Number of Distinct Values";
pub const MIN: &str = "Min";
pub const MAX: &str = "Max";

const CHOICES: &[&str] = &["rows", "nulls", "distinct", "min", "max"];
const DEFAULT_CHOICES: &[&str] = &["rows", "nulls", "distinct"];

#[derive(Debug)]
pub struct ExampleStatsAlgorithm {
    files: Vec<FileInputSetting>,
    selected: Vec<String>,
    temp_directory: Option<PathBuf>,
    sink: Option<BasicStatisticSink>,
}

impl Default for ExampleStatsAlgorithm {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            selected: DEFAULT_CHOICES.iter().map(|c| c.to_string()).collect(),
            temp_directory: None,
            sink: None,
        }
    }
}

impl ExampleStatsAlgorithm {
    pub fn static_info() -> AlgorithmInfo {
        AlgorithmInfo {
            name: "example-stats".to_string(),
            version: "1.0.0".to_string(),
            description: "Computes row, null, distinct and range statistics per column"
                .to_string(),
            authors: vec!["algohost".to_string()],
            api_version: crate::core::version::get_api_version(),
        }
    }

    pub fn create() -> PluginResult<Box<dyn Algorithm>> {
        Ok(Box::new(Self::default()))
    }

    fn selected(&self, choice: &str) -> bool {
        self.selected.iter().any(|s| s == choice)
    }

    fn column_statistic(
        &self,
        table: &str,
        column: &str,
        values: &[&str],
        null_value: &str,
        spill_name: String,
    ) -> AlgorithmResult<BasicStatistic> {
        let non_null: Vec<&str> = values.iter().copied().filter(|v| *v != null_value).collect();
        let distinct: BTreeSet<&str> = non_null.iter().copied().collect();

        if let Some(directory) = &self.temp_directory {
            spill_distinct(&directory.join(spill_name), &distinct)?;
        }

        let mut statistic =
            BasicStatistic::new(ColumnCombination::new([ColumnIdentifier::new(table, column)]));
        if self.selected("rows") {
            statistic = statistic.with_statistic(NUMBER_OF_ROWS, values.len() as i64);
        }
        if self.selected("nulls") {
            statistic = statistic.with_statistic(NULLS, (values.len() - non_null.len()) as i64);
        }
        if self.selected("distinct") {
            statistic = statistic.with_statistic(NUMBER_OF_DISTINCT_VALUES, distinct.len() as i64);
        }
        if self.selected("min") {
            if let Some(min) = extreme(&non_null, Extreme::Min) {
                statistic = statistic.with_statistic(MIN, min);
            }
        }
        if self.selected("max") {
            if let Some(max) = extreme(&non_null, Extreme::Max) {
                statistic = statistic.with_statistic(MAX, max);
            }
        }
        Ok(statistic)
    }

    fn file_statistics(
        &self,
        file_index: usize,
        file: &FileInputSetting,
        records: &Records,
    ) -> AlgorithmResult<Vec<BasicStatistic>> {
        let table = file.table_name();
        records
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let values: Vec<&str> = records.rows.iter().map(|row| row[index].as_str()).collect();
                self.column_statistic(
                    &table,
                    column,
                    &values,
                    &file.format.null_value,
                    format!("{}-{}.distinct", file_index, index),
                )
            })
            .collect()
    }
}

enum Extreme {
    Min,
    Max,
}

/// Numeric comparison when every value is an integer, otherwise lexicographic
fn extreme(values: &[&str], which: Extreme) -> Option<BasicStatisticValue> {
    let integers: Option<Vec<i64>> = values.iter().map(|v| v.trim().parse().ok()).collect();
    match integers {
        Some(numbers) if !numbers.is_empty() => {
            let value = match which {
                Extreme::Min => numbers.iter().min(),
                Extreme::Max => numbers.iter().max(),
            };
            value.map(|v| BasicStatisticValue::Integer(*v))
        }
        _ => {
            let value = match which {
                Extreme::Min => values.iter().min(),
                Extreme::Max => values.iter().max(),
            };
            value.map(|v| BasicStatisticValue::from(*v))
        }
    }
}

fn spill_distinct(path: &Path, distinct: &BTreeSet<&str>) -> AlgorithmResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in distinct {
        writeln!(writer, "{}", value)?;
    }
    writer.flush()?;
    log::trace!("Spilled {} distinct values to {}", distinct.len(), path.display());
    Ok(())
}

impl Algorithm for ExampleStatsAlgorithm {
    fn info(&self) -> AlgorithmInfo {
        Self::static_info()
    }

    fn configuration_requirements(&self) -> ConfigResult<Vec<ConfigurationRequirement>> {
        Ok(vec![
            ConfigurationRequirement::file_input(FILES_IDENTIFIER)?.with_arity(1, None)?,
            ConfigurationRequirement::new(
                STATISTICS_IDENTIFIER,
                RequirementKind::CheckBox {
                    choices: CHOICES.iter().map(|c| c.to_string()).collect(),
                    defaults: DEFAULT_CHOICES.iter().map(|c| c.to_string()).collect(),
                },
            )?
            .with_arity(0, None)?,
        ])
    }

    fn execute(&mut self) -> AlgorithmResult<()> {
        if self.files.is_empty() {
            return Err(not_configured(FILES_IDENTIFIER));
        }
        let sink = self
            .sink
            .as_ref()
            .ok_or_else(|| not_configured("basic statistic receiver"))?;

        for (file_index, file) in self.files.iter().enumerate() {
            let records = read_records(file).map_err(|e| {
                AlgorithmError::execution(format!("cannot read {}: {}", file.path.display(), e))
            })?;
            log::debug!(
                "example-stats read {} rows from {}",
                records.rows.len(),
                file.path.display()
            );

            for statistic in self.file_statistics(file_index, file, &records)? {
                emit(sink, statistic)?;
            }
        }
        Ok(())
    }

    fn as_check_box_parameter(&mut self) -> Option<&mut dyn CheckBoxParameterAlgorithm> {
        Some(self)
    }

    fn as_file_input_parameter(&mut self) -> Option<&mut dyn FileInputParameterAlgorithm> {
        Some(self)
    }

    fn as_basic_statistic(&mut self) -> Option<&mut dyn BasicStatisticAlgorithm> {
        Some(self)
    }

    fn as_temp_file(&mut self) -> Option<&mut dyn TempFileAlgorithm> {
        Some(self)
    }
}

impl FileInputParameterAlgorithm for ExampleStatsAlgorithm {
    fn set_file_input_configuration_value(
        &mut self,
        identifier: &str,
        files: &[FileInputSetting],
    ) -> AlgorithmResult<()> {
        if identifier != FILES_IDENTIFIER {
            return Err(unknown_identifier(identifier));
        }
        self.files = files.to_vec();
        Ok(())
    }
}

impl CheckBoxParameterAlgorithm for ExampleStatsAlgorithm {
    fn set_check_box_configuration_value(
        &mut self,
        identifier: &str,
        selected: &[String],
    ) -> AlgorithmResult<()> {
        if identifier != STATISTICS_IDENTIFIER {
            return Err(unknown_identifier(identifier));
        }
        if let Some(unknown) = selected.iter().find(|s| !CHOICES.contains(&s.as_str())) {
            return Err(AlgorithmError::configuration(
                identifier,
                format!("unknown statistic '{}'", unknown),
            ));
        }
        self.selected = selected.to_vec();
        Ok(())
    }
}

impl BasicStatisticAlgorithm for ExampleStatsAlgorithm {
    fn set_basic_statistic_receiver(&mut self, sink: BasicStatisticSink) {
        self.sink = Some(sink);
    }
}

impl TempFileAlgorithm for ExampleStatsAlgorithm {
    fn set_temp_directory(&mut self, directory: &Path) {
        self.temp_directory = Some(directory.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::FileFormat;
    use crate::core::shutdown::CancellationFlag;
    use crate::receiver::ResultCache;
    use crate::results::AnalysisResult;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn people_file(dir: &TempDir) -> FileInputSetting {
        let path = dir.path().join("people.csv");
        fs::write(&path, "name,age\nAda,36\nAlan,\nGrace,85\nAda,4\n").unwrap();
        FileInputSetting::new(path)
    }

    fn run(algorithm: &mut ExampleStatsAlgorithm) -> Vec<BasicStatistic> {
        let cache = Arc::new(Mutex::new(ResultCache::new()));
        algorithm.set_basic_statistic_receiver(BasicStatisticSink::new(
            cache.clone(),
            CancellationFlag::new(),
        ));
        algorithm.execute().unwrap();

        let results = cache.lock().unwrap().fetch_new_results();
        results
            .into_iter()
            .filter_map(|result| match result {
                AnalysisResult::BasicStatistic(statistic) => Some(statistic),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_default_statistics() {
        let dir = TempDir::new().unwrap();
        let mut algorithm = ExampleStatsAlgorithm::default();
        algorithm
            .set_file_input_configuration_value(FILES_IDENTIFIER, &[people_file(&dir)])
            .unwrap();

        let statistics = run(&mut algorithm);

        assert_eq!(statistics.len(), 2);
        assert_eq!(
            statistics[0].to_string(),
            "[people.csv.name] Nulls=0 Number of Distinct Values=3 Number of Rows=4"
        );
        assert_eq!(
            statistics[1].statistic(NULLS),
            Some(&BasicStatisticValue::Integer(1))
        );
        assert!(statistics[1].statistic(MIN).is_none());
    }

    #[test]
    fn test_min_max_compare_numbers_numerically() {
        let dir = TempDir::new().unwrap();
        let mut algorithm = ExampleStatsAlgorithm::default();
        algorithm
            .set_file_input_configuration_value(FILES_IDENTIFIER, &[people_file(&dir)])
            .unwrap();
        algorithm
            .set_check_box_configuration_value(
                STATISTICS_IDENTIFIER,
                &["min".to_string(), "max".to_string()],
            )
            .unwrap();

        let statistics = run(&mut algorithm);

        assert_eq!(statistics[1].to_string(), "[people.csv.age] Max=85 Min=4");
        assert_eq!(
            statistics[0].statistic(MIN),
            Some(&BasicStatisticValue::String("Ada".to_string()))
        );
    }

    #[test]
    fn test_distinct_values_spill_to_temp_directory() {
        let dir = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let mut algorithm = ExampleStatsAlgorithm::default();
        algorithm
            .set_file_input_configuration_value(FILES_IDENTIFIER, &[people_file(&dir)])
            .unwrap();
        algorithm.set_temp_directory(scratch.path());

        run(&mut algorithm);

        let spilled = fs::read_to_string(scratch.path().join("0-0.distinct")).unwrap();
        assert_eq!(spilled, "Ada\nAlan\nGrace\n");
    }

    #[test]
    fn test_spill_names_ignore_header_text() {
        let dir = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let path = dir.path().join("sales.csv");
        fs::write(&path, "km/h,../name\n12,a\n15,b\n").unwrap();
        let mut algorithm = ExampleStatsAlgorithm::default();
        algorithm
            .set_file_input_configuration_value(FILES_IDENTIFIER, &[FileInputSetting::new(path)])
            .unwrap();
        algorithm.set_temp_directory(scratch.path());

        let statistics = run(&mut algorithm);

        assert_eq!(statistics.len(), 2);
        assert_eq!(
            statistics[0].to_string(),
            "[sales.csv.km/h] Nulls=0 Number of Distinct Values=2 Number of Rows=2"
        );
        assert!(scratch.path().join("0-0.distinct").is_file());
        assert!(scratch.path().join("0-1.distinct").is_file());
    }

    #[test]
    fn test_null_value_of_file_format_counts_as_null() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.tsv");
        fs::write(&path, "exported by hand\nname\tage\nAda\tNA\nAlan\t41\n").unwrap();
        let format = FileFormat {
            skip_lines: 1,
            null_value: "NA".to_string(),
            ..FileFormat::tsv()
        };
        let mut algorithm = ExampleStatsAlgorithm::default();
        algorithm
            .set_file_input_configuration_value(
                FILES_IDENTIFIER,
                &[FileInputSetting::with_format(path, format)],
            )
            .unwrap();

        let statistics = run(&mut algorithm);

        assert_eq!(
            statistics[1].to_string(),
            "[export.tsv.age] Nulls=1 Number of Distinct Values=1 Number of Rows=2"
        );
    }

    #[test]
    fn test_unknown_statistic_is_rejected() {
        let mut algorithm = ExampleStatsAlgorithm::default();
        let result = algorithm
            .set_check_box_configuration_value(STATISTICS_IDENTIFIER, &["median".to_string()]);
        assert!(matches!(result, Err(AlgorithmError::Configuration { .. })));
    }
}
