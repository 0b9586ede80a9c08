//! API for builtin algorithm registration and discovery
//!
//! Built-in algorithms register themselves at link time with the `builtin!`
//! macro and are picked up by
//! [`AlgorithmRegistry::with_builtins`](crate::plugin::registry::AlgorithmRegistry::with_builtins).

use crate::plugin::types::DiscoveredAlgorithm;
use inventory;

/// Entry for a builtin algorithm in the link-time registry
pub struct BuiltinAlgorithmEntry {
    pub factory: fn() -> DiscoveredAlgorithm,
}

// Collect all builtin algorithm entries
inventory::collect!(BuiltinAlgorithmEntry);

/// Macro for registering builtin algorithms
#[macro_export]
macro_rules! builtin {
    ($factory_expr:expr) => {
        inventory::submit!($crate::plugin::builtin::api::BuiltinAlgorithmEntry {
            factory: $factory_expr
        });
    };
}

/// Get all registered builtin algorithms
pub fn get_all_builtin_algorithms() -> Vec<DiscoveredAlgorithm> {
    inventory::iter::<BuiltinAlgorithmEntry>()
        .map(|entry| (entry.factory)())
        .collect()
}
