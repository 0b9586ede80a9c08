//! Configuration requirements and values
//!
//! Algorithms declare [`ConfigurationRequirement`]s. The host turns raw user
//! input into [`ConfigurationValue`]s, which the dispatch engine then hands to
//! the algorithm through its typed setters.

pub mod error;
pub mod requirement;
pub mod settings;
pub mod value;

pub use error::{ConfigResult, ConfigurationError};
pub use requirement::{Arity, ConfigurationRequirement, RequirementDescription, RequirementKind};
pub use settings::{
    ConnectionCatalog, DatabaseConnectionSetting, DbSystem, FileFormat, FileInputSetting,
    InMemoryConnectionCatalog, RelationalInputSetting, TableInputSetting,
};
pub use value::{ConfigurationValue, ValueKind, ValuePayload};
