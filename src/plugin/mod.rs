//! Algorithm Plugin Module
//!
//! Algorithms declare what they accept and what they produce through optional
//! capability accessors. The analyzer turns those accessors into a cached
//! capability set, the registry answers catalog queries over it, and the
//! dispatcher delivers configuration values and result sinks through it.

// Internal modules - all access should go through api module
pub(crate) mod analyzer;
pub(crate) mod builtin;
pub(crate) mod capability;
pub(crate) mod dispatch;
pub(crate) mod error;
pub(crate) mod registry;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module - the only public interface for the plugin system
pub mod api;

#[cfg(test)]
mod tests;
