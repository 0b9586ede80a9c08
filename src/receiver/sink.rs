//! Typed result sinks handed to algorithms
//!
//! A sink wraps the run's shared receiver but only accepts its own result
//! variant, so an algorithm that declared functional dependencies cannot
//! emit anything else.

use crate::core::shutdown::CancellationFlag;
use crate::receiver::error::{ReceiverError, ReceiverResult};
use crate::receiver::OmniscientResultReceiver;
use crate::results::{
    AnalysisResult, BasicStatistic, ConditionalUniqueColumnCombination, FunctionalDependency, InclusionDependency,
    OrderDependency, ResultVariant, UniqueColumnCombination,
};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

/// Receiver shared between the host and every sink of one run
pub type SharedReceiver = Arc<Mutex<dyn OmniscientResultReceiver>>;

pub struct TypedSink<R: ResultVariant> {
    receiver: SharedReceiver,
    cancellation: CancellationFlag,
    _variant: PhantomData<fn(R)>,
}

impl<R: ResultVariant> TypedSink<R> {
    pub fn new(receiver: SharedReceiver, cancellation: CancellationFlag) -> Self {
        Self {
            receiver,
            cancellation,
            _variant: PhantomData,
        }
    }

    /// Deliver one result. Fails with `Cancelled` once the run is cancelled.
    pub fn receive(&self, result: R) -> ReceiverResult<()> {
        if self.cancellation.is_cancelled() {
            return Err(ReceiverError::Cancelled);
        }

        let result: AnalysisResult = result.into();
        let mut receiver = self.lock()?;
        result.send_result_to(&mut *receiver)
    }

    /// Whether the receiver would accept `result`
    pub fn accepts(&self, result: &R) -> bool {
        match self.lock() {
            Ok(receiver) => result.accepted_by(&*receiver),
            Err(_) => false,
        }
    }

    fn lock(&self) -> ReceiverResult<MutexGuard<'_, dyn OmniscientResultReceiver + 'static>> {
        self.receiver
            .lock()
            .map_err(|_| ReceiverError::storage(R::RESULT_TYPE, "receiver lock poisoned"))
    }
}

impl<R: ResultVariant> Clone for TypedSink<R> {
    fn clone(&self) -> Self {
        Self {
            receiver: Arc::clone(&self.receiver),
            cancellation: self.cancellation.clone(),
            _variant: PhantomData,
        }
    }
}

impl<R: ResultVariant> fmt::Debug for TypedSink<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSink")
            .field("result_type", &R::RESULT_TYPE)
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish()
    }
}

pub type FunctionalDependencySink = TypedSink<FunctionalDependency>;
pub type InclusionDependencySink = TypedSink<InclusionDependency>;
pub type UniqueColumnCombinationSink = TypedSink<UniqueColumnCombination>;
pub type ConditionalUniqueColumnCombinationSink = TypedSink<ConditionalUniqueColumnCombination>;
pub type OrderDependencySink = TypedSink<OrderDependency>;
pub type BasicStatisticSink = TypedSink<BasicStatistic>;
