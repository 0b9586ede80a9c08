//! Execution Host
//!
//! Turns a request (algorithm name plus raw inputs) into a finished run
//! against a caller-supplied receiver.

pub mod error;
pub mod executor;
pub mod request;

pub use error::{ExecutionError, ExecutionResult};
pub use executor::{AlgorithmExecutor, RunReceiver};
pub use request::{ExecutionReport, ExecutionRequest};
