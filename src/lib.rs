//! Capability-based host for data profiling algorithms
//!
//! Algorithms declare configuration requirements and the typed capabilities
//! they support. The host builds configuration values from raw input, hands
//! each value to the algorithm through the matching capability, attaches
//! result sinks and collects the results in a receiver.

pub mod app;
pub mod configuration;
pub mod core;
pub mod execution;
pub mod plugin;
pub mod receiver;
pub mod results;
