//! Concrete configuration values

use crate::configuration::settings::{
    DatabaseConnectionSetting, FileInputSetting, RelationalInputSetting, TableInputSetting,
};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Kind tag shared by a requirement and the values built from it
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    String,
    Boolean,
    Integer,
    ListBox,
    CheckBox,
    FileInput,
    RelationalInput,
    TableInput,
    DatabaseConnection,
}

/// Typed payloads, one entry per configured setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "settings", rename_all = "kebab-case")]
pub enum ValuePayload {
    String(Vec<String>),
    Boolean(Vec<bool>),
    Integer(Vec<i64>),
    ListBox(Vec<String>),
    CheckBox(Vec<String>),
    FileInput(Vec<FileInputSetting>),
    RelationalInput(Vec<RelationalInputSetting>),
    TableInput(Vec<TableInputSetting>),
    DatabaseConnection(Vec<DatabaseConnectionSetting>),
}

impl ValuePayload {
    pub fn kind(&self) -> ValueKind {
        match self {
            ValuePayload::String(_) => ValueKind::String,
            ValuePayload::Boolean(_) => ValueKind::Boolean,
            ValuePayload::Integer(_) => ValueKind::Integer,
            ValuePayload::ListBox(_) => ValueKind::ListBox,
            ValuePayload::CheckBox(_) => ValueKind::CheckBox,
            ValuePayload::FileInput(_) => ValueKind::FileInput,
            ValuePayload::RelationalInput(_) => ValueKind::RelationalInput,
            ValuePayload::TableInput(_) => ValueKind::TableInput,
            ValuePayload::DatabaseConnection(_) => ValueKind::DatabaseConnection,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ValuePayload::String(v) | ValuePayload::ListBox(v) | ValuePayload::CheckBox(v) => {
                v.len()
            }
            ValuePayload::Boolean(v) => v.len(),
            ValuePayload::Integer(v) => v.len(),
            ValuePayload::FileInput(v) => v.len(),
            ValuePayload::RelationalInput(v) => v.len(),
            ValuePayload::TableInput(v) => v.len(),
            ValuePayload::DatabaseConnection(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A built value, immutable once constructed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationValue {
    identifier: String,
    payload: ValuePayload,
}

impl ConfigurationValue {
    pub fn new(identifier: impl Into<String>, payload: ValuePayload) -> Self {
        Self {
            identifier: identifier.into(),
            payload,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn kind(&self) -> ValueKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &ValuePayload {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
