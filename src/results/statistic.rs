//! Basic statistics over a column combination

use crate::receiver::OmniscientResultReceiver;
use crate::results::column::{ColumnCombination, ColumnIdentifier};
use crate::results::number::FiniteDouble;
use crate::results::{ResultType, ResultVariant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single statistic value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum BasicStatisticValue {
    Integer(i64),
    Double(FiniteDouble),
    String(String),
    IntegerList(Vec<i64>),
    StringList(Vec<String>),
}

impl fmt::Display for BasicStatisticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicStatisticValue::Integer(value) => write!(f, "{}", value),
            BasicStatisticValue::Double(value) => write!(f, "{}", value),
            BasicStatisticValue::String(value) => write!(f, "{}", value),
            BasicStatisticValue::IntegerList(values) => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            BasicStatisticValue::StringList(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

impl From<i64> for BasicStatisticValue {
    fn from(value: i64) -> Self {
        BasicStatisticValue::Integer(value)
    }
}

impl From<FiniteDouble> for BasicStatisticValue {
    fn from(value: FiniteDouble) -> Self {
        BasicStatisticValue::Double(value)
    }
}

impl From<&str> for BasicStatisticValue {
    fn from(value: &str) -> Self {
        BasicStatisticValue::String(value.to_string())
    }
}

impl From<String> for BasicStatisticValue {
    fn from(value: String) -> Self {
        BasicStatisticValue::String(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicStatistic {
    column_combination: ColumnCombination,
    statistic_map: BTreeMap<String, BasicStatisticValue>,
}

impl BasicStatistic {
    pub fn new(column_combination: ColumnCombination) -> Self {
        Self {
            column_combination,
            statistic_map: BTreeMap::new(),
        }
    }

    /// Builder-style insertion; a later value for the same name wins
    pub fn with_statistic(
        mut self,
        name: impl Into<String>,
        value: impl Into<BasicStatisticValue>,
    ) -> Self {
        self.statistic_map.insert(name.into(), value.into());
        self
    }

    pub fn column_combination(&self) -> &ColumnCombination {
        &self.column_combination
    }

    pub fn statistic(&self, name: &str) -> Option<&BasicStatisticValue> {
        self.statistic_map.get(name)
    }

    pub fn statistics(&self) -> impl Iterator<Item = (&str, &BasicStatisticValue)> {
        self.statistic_map.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn column_identifiers(&self) -> Vec<&ColumnIdentifier> {
        self.column_combination.columns().collect()
    }
}

impl fmt::Display for BasicStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_combination)?;
        for (name, value) in &self.statistic_map {
            write!(f, " {}={}", name, value)?;
        }
        Ok(())
    }
}

impl ResultVariant for BasicStatistic {
    const RESULT_TYPE: ResultType = ResultType::BasicStatistic;

    fn accepted_by(&self, receiver: &dyn OmniscientResultReceiver) -> bool {
        receiver.accepted_basic_statistic(self)
    }
}
