//! # Forwarder Service
//!
//! Application service that implements the [`ForwarderApi`] inbound port.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Owns the immutable owner identity and domain separator
//! - Owns the nonce ledger (the only mutable state)
//! - Delegates digest/recovery/expiry logic to the domain layer
//! - Uses the outbound ports (`CallExecutor`, `Clock`, `AuditSink`)
//!
//! ## Delegated-call pipeline
//!
//! ```text
//! expiry → nonce precheck → digest → recover signer → consume nonce → execute → audit
//! ```
//!
//! The nonce is consumed BEFORE the executor runs. A forwarded payload that
//! reenters this service can therefore never reuse the same nonce, and a
//! downstream failure leaves the nonce consumed: probing a signature's
//! validity by resubmitting a failing request costs a fresh nonce each time.

use crate::domain::errors::ForwarderError;
use crate::domain::nonce::NonceLedger;
use crate::domain::{digest, ecdsa, expiry};
use crate::ports::inbound::ForwarderApi;
use crate::ports::outbound::{AuditSink, CallExecutor, Clock};
use shared_types::{
    Address, AuditEvent, CallOutcome, EcdsaSignature, ForwardRequest, ForwarderConfig, Hash,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Single-owner authorized call forwarder.
///
/// Generic over the execution substrate, the way a gateway-backed service
/// is generic over its gateway. Clock and audit sink are dynamic so
/// embeddings can swap them without changing the service type.
pub struct ForwarderService<X: CallExecutor> {
    owner: Address,
    domain_separator: Hash,
    nonces: NonceLedger,
    executor: X,
    clock: Arc<dyn Clock>,
    audit: Arc<dyn AuditSink>,
}

impl<X: CallExecutor> ForwarderService<X> {
    /// Build a forwarder from its construction-time configuration.
    ///
    /// The domain separator is derived once from `(chain_id, forwarder)`
    /// and never changes; neither does the owner.
    pub fn new(
        config: ForwarderConfig,
        executor: X,
        clock: Arc<dyn Clock>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        let domain_separator = digest::domain_separator(config.chain_id, config.forwarder);
        Self {
            owner: config.owner,
            domain_separator,
            nonces: NonceLedger::new(),
            executor,
            clock,
            audit,
        }
    }

    /// The domain separator bound into every signed digest.
    #[must_use]
    pub fn domain_separator(&self) -> Hash {
        self.domain_separator
    }

    /// Compute the digest the owner must sign to authorize `request`.
    ///
    /// Exposed so off-system signers can build signatures without
    /// reimplementing the encoding.
    #[must_use]
    pub fn request_digest(&self, request: &ForwardRequest) -> Hash {
        digest::build_digest(&self.domain_separator, request)
    }

    /// Execute the forwarded invocation and emit the audit record.
    ///
    /// Shared tail of both modes. `caller` is the effective submitter, which
    /// in delegated mode may differ from the owner.
    async fn forward(
        &self,
        caller: Address,
        request: ForwardRequest,
    ) -> Result<CallOutcome, ForwarderError> {
        let outcome = self
            .executor
            .execute(request.destination, request.value, &request.payload)
            .await;

        match outcome {
            Ok(outcome) => {
                let receivers = self
                    .audit
                    .emit(AuditEvent {
                        caller,
                        destination: request.destination,
                        value: request.value,
                        position: request.position,
                        payload: request.payload,
                    })
                    .await;

                info!(
                    caller = %hex_addr(&caller),
                    destination = %hex_addr(&request.destination),
                    value = %request.value,
                    audit_receivers = receivers,
                    "Forwarded call executed"
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!(
                    caller = %hex_addr(&caller),
                    destination = %hex_addr(&request.destination),
                    error = %e,
                    "Forwarded call failed"
                );
                Err(ForwarderError::ExecutionFailed(e.to_string()))
            }
        }
    }
}

#[async_trait::async_trait]
impl<X: CallExecutor> ForwarderApi for ForwarderService<X> {
    async fn direct_call(
        &self,
        caller: Address,
        request: ForwardRequest,
    ) -> Result<CallOutcome, ForwarderError> {
        if caller != self.owner {
            warn!(caller = %hex_addr(&caller), "Direct call from non-owner rejected");
            return Err(ForwarderError::Unauthorized);
        }

        self.forward(caller, request).await
    }

    async fn authorized_call(
        &self,
        caller: Address,
        request: ForwardRequest,
        signature: EcdsaSignature,
    ) -> Result<CallOutcome, ForwarderError> {
        // 1. Validity window
        if expiry::is_expired(request.expiry, self.clock.now()) {
            return Err(ForwarderError::Expired);
        }

        // 2. Fast nonce reject; the authoritative check-and-increment
        //    happens at the commit point below
        let expected = self.nonces.expected(&self.owner);
        if request.nonce != expected {
            return Err(ForwarderError::InvalidNonce {
                expected,
                presented: request.nonce,
            });
        }

        // 3-4. The digest binds every request field plus the domain
        //    separator; only the owner's signature over it authorizes
        let request_digest = digest::build_digest(&self.domain_separator, &request);
        let recovered = ecdsa::recover_signer(&request_digest, &signature)?;
        if recovered != self.owner {
            debug!(
                recovered = %hex_addr(&recovered),
                "Signature recovered to non-owner"
            );
            return Err(ForwarderError::Unauthorized);
        }

        // 5. Commit the nonce before executing; a reentrant forwarded call
        //    sees the advanced counter, and exactly one of two racing
        //    same-nonce submissions passes this point
        self.nonces.try_consume(&self.owner, request.nonce)?;

        // 6. Execute; the nonce stays consumed even if this fails
        self.forward(caller, request).await
    }

    fn get_signer(
        &self,
        digest: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Address, ForwarderError> {
        Ok(ecdsa::recover_signer(digest, signature)?)
    }

    fn owner(&self) -> Address {
        self.owner
    }

    fn expected_nonce(&self, principal: &Address) -> u64 {
        self.nonces.expected(principal)
    }
}

fn hex_addr(address: &Address) -> String {
    let mut out = String::with_capacity(2 + 40);
    out.push_str("0x");
    for byte in address {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
