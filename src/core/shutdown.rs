//! Cooperative cancellation for algorithm runs
//!
//! A run checks its flag only at delivery boundaries: before the next
//! configuration value is handed to the algorithm and before the next result
//! is sent to the receiver. A delivery that already started always completes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag, cheap to clone across runs and signal handlers
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    requested: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every run sharing this flag
    pub fn cancel(&self) {
        // Release pairs with the Acquire load in is_cancelled()
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

/// Cancel the flag when the process receives Ctrl-C
///
/// Must be called from within a tokio runtime. A second Ctrl-C is left to the
/// default handler once the task has finished.
pub fn install_interrupt_handler(flag: CancellationFlag) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, stopping at the next delivery boundary");
            flag.cancel();
        }
    });
}
