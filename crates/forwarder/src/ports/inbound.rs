//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the forwarder subsystem.

use crate::domain::errors::ForwarderError;
use shared_types::{Address, CallOutcome, EcdsaSignature, ForwardRequest, Hash};

/// Primary forwarder API.
///
/// The `caller` argument is the ambient invocation identity — the entity
/// submitting the operation, as authenticated by whatever transport embeds
/// this service. Implementations must be thread-safe (`Send + Sync`).
#[async_trait::async_trait]
pub trait ForwarderApi: Send + Sync {
    /// Forward a call in direct mode.
    ///
    /// Valid only when `caller` is the owner; no nonce, expiry, or signature
    /// checks apply (the owner controls the ordering of its own calls, so
    /// the mode is not replay-sensitive).
    ///
    /// # Errors
    /// * `Unauthorized` - caller is not the owner
    /// * `ExecutionFailed` - the downstream invocation failed
    async fn direct_call(
        &self,
        caller: Address,
        request: ForwardRequest,
    ) -> Result<CallOutcome, ForwarderError>;

    /// Forward a call in delegated mode. Callable by anyone; authorization
    /// comes from the owner's signature over the request digest, not from
    /// `caller`.
    ///
    /// The owner's nonce is consumed before the downstream invocation runs,
    /// and is NOT restored if that invocation fails: a failed forwarded call
    /// still burns its nonce.
    ///
    /// # Errors
    /// * `Expired` - the clock has reached `request.expiry`
    /// * `InvalidNonce` - nonce mismatch (replay or out-of-order)
    /// * `InvalidSignature` - malformed signature or failed recovery
    /// * `Unauthorized` - signature valid but not from the owner
    /// * `ExecutionFailed` - the downstream invocation failed
    async fn authorized_call(
        &self,
        caller: Address,
        request: ForwardRequest,
        signature: EcdsaSignature,
    ) -> Result<CallOutcome, ForwarderError>;

    /// Read-only signer recovery, exposed for off-system verification.
    ///
    /// # Errors
    /// * `InvalidSignature` - malformed signature or failed recovery
    fn get_signer(
        &self,
        digest: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Address, ForwarderError>;

    /// The privileged principal, fixed at construction.
    fn owner(&self) -> Address;

    /// The next nonce expected from `principal`.
    fn expected_nonce(&self, principal: &Address) -> u64;
}
