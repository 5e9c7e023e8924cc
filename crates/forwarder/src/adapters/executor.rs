//! # In-Memory Call Executor
//!
//! Execution substrate for embeddings and the test suite: per-address
//! balances plus registered payload handlers standing in for downstream
//! targets. Value moves from a single pre-funded source account (the
//! forwarder's own holdings, as a relay contract spends its own deposit).
//!
//! Effects are all-or-nothing: a handler failure rolls the value transfer
//! back before the error is returned.

use crate::ports::outbound::{CallExecutor, ExecutorError};
use parking_lot::Mutex;
use shared_types::{Address, CallOutcome, U256};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Downstream target logic: payload bytes in, return data or revert reason out.
pub type PayloadHandler = Arc<dyn Fn(&[u8]) -> Result<Vec<u8>, String> + Send + Sync>;

/// In-memory execution substrate.
pub struct InMemoryCallExecutor {
    source: Address,
    balances: Mutex<HashMap<Address, U256>>,
    handlers: Mutex<HashMap<Address, PayloadHandler>>,
}

impl InMemoryCallExecutor {
    /// Create an executor whose value transfers are funded by `source`.
    #[must_use]
    pub fn new(source: Address) -> Self {
        Self {
            source,
            balances: Mutex::new(HashMap::new()),
            handlers: Mutex::new(HashMap::new()),
        }
    }

    /// Credit an account (e.g. pre-fund the source).
    pub fn deposit(&self, account: Address, amount: U256) {
        let mut balances = self.balances.lock();
        let entry = balances.entry(account).or_insert_with(U256::zero);
        *entry += amount;
    }

    /// Current balance of an account.
    #[must_use]
    pub fn balance(&self, account: &Address) -> U256 {
        self.balances
            .lock()
            .get(account)
            .copied()
            .unwrap_or_else(U256::zero)
    }

    /// Register downstream logic for a destination. Destinations without a
    /// handler accept value and ignore payload bytes.
    ///
    /// The dispatch lock is released before a handler runs, so handlers may
    /// reach back into this executor.
    pub fn register_handler<F>(&self, destination: Address, handler: F)
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, String> + Send + Sync + 'static,
    {
        self.handlers.lock().insert(destination, Arc::new(handler));
    }

    /// Move `value` from the source to `destination`, or fail untouched.
    fn transfer(&self, destination: Address, value: U256) -> Result<(), ExecutorError> {
        if value.is_zero() {
            return Ok(());
        }

        let mut balances = self.balances.lock();
        let available = balances.get(&self.source).copied().unwrap_or_else(U256::zero);
        if available < value {
            return Err(ExecutorError::InsufficientBalance { needed: value });
        }

        balances.insert(self.source, available - value);
        let credited = balances.entry(destination).or_insert_with(U256::zero);
        *credited += value;
        Ok(())
    }

    /// Reverse a transfer made by [`Self::transfer`].
    fn refund(&self, destination: Address, value: U256) {
        if value.is_zero() {
            return;
        }

        let mut balances = self.balances.lock();
        if let Some(credited) = balances.get_mut(&destination) {
            *credited -= value;
        }
        let source = balances.entry(self.source).or_insert_with(U256::zero);
        *source += value;
    }
}

#[async_trait::async_trait]
impl CallExecutor for InMemoryCallExecutor {
    async fn execute(
        &self,
        destination: Address,
        value: U256,
        payload: &[u8],
    ) -> Result<CallOutcome, ExecutorError> {
        self.transfer(destination, value)?;

        // Clone the handle out so the handler runs lock-free and can reenter
        let handler: Option<PayloadHandler> = self.handlers.lock().get(&destination).cloned();
        let Some(handler) = handler else {
            debug!(payload_len = payload.len(), "No handler at destination, value-only call");
            return Ok(CallOutcome::default());
        };

        match handler(payload) {
            Ok(return_data) => Ok(CallOutcome { return_data }),
            Err(reason) => {
                // Revert entirely: the transfer must not survive a failed call
                self.refund(destination, value);
                Err(ExecutorError::Reverted { reason })
            }
        }
    }
}
