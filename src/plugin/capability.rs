//! Capability catalog
//!
//! The fixed list of typed interactions an algorithm may support. A
//! configuration value reaches an algorithm only through the capability that
//! matches its kind, and a result sink is only handed out for a result
//! capability the algorithm declared.

use crate::configuration::ValueKind;
use crate::results::ResultType;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Bumped whenever a kind is added or removed; every algorithm must be rebuilt
pub const CAPABILITY_CATALOG_VERSION: u32 = 1;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKind {
    StringParameter,
    BooleanParameter,
    IntegerParameter,
    ListBoxParameter,
    CheckBoxParameter,
    FileInputParameter,
    RelationalInputParameter,
    TableInputParameter,
    DatabaseConnectionParameter,
    FunctionalDependency,
    InclusionDependency,
    UniqueColumnCombination,
    ConditionalUniqueColumnCombination,
    OrderDependency,
    BasicStatistic,
    TempFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CapabilityCategory {
    Configuration,
    Result,
    Resource,
}

impl CapabilityKind {
    pub fn all() -> impl Iterator<Item = CapabilityKind> {
        CapabilityKind::iter()
    }

    pub fn label(&self) -> &'static str {
        match self {
            CapabilityKind::StringParameter => "accepts string config",
            CapabilityKind::BooleanParameter => "accepts boolean config",
            CapabilityKind::IntegerParameter => "accepts integer config",
            CapabilityKind::ListBoxParameter => "accepts list box config",
            CapabilityKind::CheckBoxParameter => "accepts check box config",
            CapabilityKind::FileInputParameter => "accepts file input",
            CapabilityKind::RelationalInputParameter => "accepts relational input",
            CapabilityKind::TableInputParameter => "accepts table input",
            CapabilityKind::DatabaseConnectionParameter => "accepts database connection",
            CapabilityKind::FunctionalDependency => "produces functional dependencies",
            CapabilityKind::InclusionDependency => "produces inclusion dependencies",
            CapabilityKind::UniqueColumnCombination => "produces unique column combinations",
            CapabilityKind::ConditionalUniqueColumnCombination => {
                "produces conditional unique column combinations"
            }
            CapabilityKind::OrderDependency => "produces order dependencies",
            CapabilityKind::BasicStatistic => "produces basic statistics",
            CapabilityKind::TempFile => "requires a scratch directory",
        }
    }

    pub fn category(&self) -> CapabilityCategory {
        match self {
            CapabilityKind::StringParameter
            | CapabilityKind::BooleanParameter
            | CapabilityKind::IntegerParameter
            | CapabilityKind::ListBoxParameter
            | CapabilityKind::CheckBoxParameter
            | CapabilityKind::FileInputParameter
            | CapabilityKind::RelationalInputParameter
            | CapabilityKind::TableInputParameter
            | CapabilityKind::DatabaseConnectionParameter => CapabilityCategory::Configuration,
            CapabilityKind::FunctionalDependency
            | CapabilityKind::InclusionDependency
            | CapabilityKind::UniqueColumnCombination
            | CapabilityKind::ConditionalUniqueColumnCombination
            | CapabilityKind::OrderDependency
            | CapabilityKind::BasicStatistic => CapabilityCategory::Result,
            CapabilityKind::TempFile => CapabilityCategory::Resource,
        }
    }

    /// The one capability that receives values of `kind`
    pub fn for_value_kind(kind: ValueKind) -> Self {
        match kind {
            ValueKind::String => CapabilityKind::StringParameter,
            ValueKind::Boolean => CapabilityKind::BooleanParameter,
            ValueKind::Integer => CapabilityKind::IntegerParameter,
            ValueKind::ListBox => CapabilityKind::ListBoxParameter,
            ValueKind::CheckBox => CapabilityKind::CheckBoxParameter,
            ValueKind::FileInput => CapabilityKind::FileInputParameter,
            ValueKind::RelationalInput => CapabilityKind::RelationalInputParameter,
            ValueKind::TableInput => CapabilityKind::TableInputParameter,
            ValueKind::DatabaseConnection => CapabilityKind::DatabaseConnectionParameter,
        }
    }

    /// The capability an algorithm needs to emit `result_type`
    pub fn for_result_type(result_type: ResultType) -> Self {
        match result_type {
            ResultType::FunctionalDependency => CapabilityKind::FunctionalDependency,
            ResultType::InclusionDependency => CapabilityKind::InclusionDependency,
            ResultType::UniqueColumnCombination => CapabilityKind::UniqueColumnCombination,
            ResultType::ConditionalUniqueColumnCombination => {
                CapabilityKind::ConditionalUniqueColumnCombination
            }
            ResultType::OrderDependency => CapabilityKind::OrderDependency,
            ResultType::BasicStatistic => CapabilityKind::BasicStatistic,
        }
    }
}

/// Capabilities one algorithm satisfies, computed once and treated as data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilitySet {
    kinds: BTreeSet<CapabilityKind>,
}

impl CapabilitySet {
    pub fn new(kinds: impl IntoIterator<Item = CapabilityKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, kind: CapabilityKind) {
        self.kinds.insert(kind);
    }

    pub fn satisfies(&self, kind: CapabilityKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// True when every kind in `required` is satisfied; empty `required` is
    /// always satisfied
    pub fn satisfies_all(&self, required: &[CapabilityKind]) -> bool {
        required.iter().all(|kind| self.satisfies(*kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = CapabilityKind> + '_ {
        self.kinds.iter().copied()
    }

    pub fn in_category(&self, category: CapabilityCategory) -> impl Iterator<Item = CapabilityKind> + '_ {
        self.iter().filter(move |kind| kind.category() == category)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|kind| kind.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}
