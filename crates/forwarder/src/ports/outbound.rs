//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define the dependencies this subsystem needs: the execution
//! substrate for forwarded calls, a clock for expiry checks, and a sink for
//! audit records.

use shared_types::{Address, AuditEvent, CallOutcome, U256};
use thiserror::Error;

/// Error from a forwarded invocation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutorError {
    /// The executor cannot cover the requested value transfer
    #[error("Insufficient balance to transfer {needed}")]
    InsufficientBalance { needed: U256 },

    /// The destination rejected the invocation
    #[error("Destination reverted: {reason}")]
    Reverted { reason: String },
}

/// Execution substrate for forwarded calls.
///
/// An implementation performs a single invocation transferring `value` to
/// `destination` with `payload` as argument data. Effects must be
/// all-or-nothing: on an `Err` return, no value moves and no downstream
/// state mutates.
///
/// An executor MAY reenter the forwarder from within the invocation (the
/// payload could encode a call back in); the service's commit-before-execute
/// nonce discipline is what keeps that safe.
#[async_trait::async_trait]
pub trait CallExecutor: Send + Sync {
    /// Perform the forwarded invocation.
    ///
    /// # Errors
    /// Any `ExecutorError`; the service surfaces it opaquely as
    /// `ForwarderError::ExecutionFailed` and fails the whole request.
    async fn execute(
        &self,
        destination: Address,
        value: U256,
        payload: &[u8],
    ) -> Result<CallOutcome, ExecutorError>;
}

// Shared executors are common: an embedding keeps a handle for deposits and
// handler registration while the service owns its copy
#[async_trait::async_trait]
impl<T: CallExecutor + ?Sized> CallExecutor for std::sync::Arc<T> {
    async fn execute(
        &self,
        destination: Address,
        value: U256,
        payload: &[u8],
    ) -> Result<CallOutcome, ExecutorError> {
        (**self).execute(destination, value, payload).await
    }
}

/// Time source for the expiry guard.
pub trait Clock: Send + Sync {
    /// Current time in unix seconds.
    fn now(&self) -> u64;
}

/// Sink for audit records.
///
/// The service emits exactly one event per successful forwarded call;
/// delivery is fire-and-forget from the service's perspective.
#[async_trait::async_trait]
pub trait AuditSink: Send + Sync {
    /// Emit an audit event; returns the number of observers that received it.
    async fn emit(&self, event: AuditEvent) -> usize;
}
