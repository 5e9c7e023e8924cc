//! # Nonce Ledger
//!
//! Tracks the next expected sequence number per principal. Counters start
//! at 0, advance by exactly 1 per consumed authorization, and are never
//! decremented or reused.
//!
//! All mutation funnels through [`NonceLedger::try_consume`], a single
//! compare-and-increment critical section. Two concurrent submissions
//! carrying the same nonce therefore cannot both pass: exactly one wins,
//! the other observes the advanced counter and fails.

use crate::domain::errors::ForwarderError;
use parking_lot::Mutex;
use shared_types::Address;
use std::collections::HashMap;

/// Per-principal monotonic sequence counters.
#[derive(Debug, Default)]
pub struct NonceLedger {
    entries: Mutex<HashMap<Address, u64>>,
}

impl NonceLedger {
    /// Create an empty ledger; every principal starts at nonce 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The next nonce expected from `principal`.
    pub fn expected(&self, principal: &Address) -> u64 {
        self.entries.lock().get(principal).copied().unwrap_or(0)
    }

    /// Atomically consume `presented` for `principal`.
    ///
    /// Compares and increments under one lock acquisition: on match the
    /// counter advances by exactly 1 and the consumed value is returned; on
    /// mismatch (stale replay or future nonce alike) nothing mutates.
    ///
    /// The critical section covers only this compare-and-increment, never
    /// any downstream call, so reentrant callers cannot deadlock here.
    pub fn try_consume(
        &self,
        principal: &Address,
        presented: u64,
    ) -> Result<u64, ForwarderError> {
        let mut entries = self.entries.lock();
        let counter = entries.entry(*principal).or_insert(0);

        if *counter != presented {
            return Err(ForwarderError::InvalidNonce {
                expected: *counter,
                presented,
            });
        }

        *counter += 1;
        Ok(presented)
    }
}
