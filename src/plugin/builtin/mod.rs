//! Built-in Algorithm Implementations
//!
//! Small example algorithms that ship with the host. They exercise every
//! capability kind and double as references for algorithm authors.

pub mod api;
mod csv;
pub mod example_fd;
pub mod example_ind_od;
pub mod example_stats;
pub mod example_ucc;

use crate::core::error_handling::log_recoverable_error;
use crate::plugin::error::{AlgorithmError, AlgorithmResult};
use crate::receiver::{ReceiverError, TypedSink};
use crate::results::ResultVariant;

/// Send a result. A schema rejection only drops that result; anything else
/// stops the algorithm.
pub(crate) fn emit<R: ResultVariant>(sink: &TypedSink<R>, result: R) -> AlgorithmResult<bool> {
    match sink.receive(result) {
        Ok(()) => Ok(true),
        Err(e @ ReceiverError::ColumnNameMismatch { .. }) => {
            log_recoverable_error(&e, "Result rejected");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn unknown_identifier(identifier: &str) -> AlgorithmError {
    AlgorithmError::configuration(identifier, "not a requirement of this algorithm")
}

pub(crate) fn not_configured(what: &str) -> AlgorithmError {
    AlgorithmError::execution(format!("{} was not configured", what))
}
