//! # Core Domain Entities
//!
//! Defines the entities that cross the forwarder's boundary: the request
//! being forwarded, the signature authorizing it, and the audit record
//! emitted once it executes.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

// Re-export U256 from primitive-types so every crate uses the same word type
pub use primitive_types::U256;

/// A 32-byte keccak256 hash (digests, domain separators).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
///
/// Identifies both principals (the owner, submitters) and forwarding
/// destinations.
pub type Address = [u8; 20];

/// The zero address, used as the malformed-signature recovery sentinel.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// A request to forward one downstream invocation.
///
/// Immutable once constructed. The same struct is used in both authorization
/// modes; delegated mode additionally binds every field into the signed
/// digest, so any post-signing change invalidates the signature.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardRequest {
    /// Absolute deadline (unix seconds). The request is invalid once the
    /// forwarder's clock reaches this value. `U256::MAX` never expires.
    pub expiry: U256,
    /// Owner sequence number; must equal the ledger's expected nonce.
    pub nonce: u64,
    /// Target of the forwarded invocation.
    pub destination: Address,
    /// Amount transferred to `destination` alongside the invocation.
    pub value: U256,
    /// Byte offset metadata echoed into the audit event. Opaque to the
    /// forwarder: it is not validated against `payload` content.
    pub position: U256,
    /// Argument bytes for the forwarded invocation.
    pub payload: Vec<u8>,
}

/// ECDSA signature on the secp256k1 curve.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    #[serde_as(as = "Bytes")]
    pub r: [u8; 32],
    /// S component (32 bytes)
    #[serde_as(as = "Bytes")]
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

/// Audit record emitted after every successful forwarded call.
///
/// Produced exactly once per execution and never mutated. `caller` is the
/// effective submitter: the ambient caller for direct calls, which in
/// delegated mode may differ from the owner who signed the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Identity that submitted the call.
    pub caller: Address,
    /// Target of the forwarded invocation.
    pub destination: Address,
    /// Amount transferred.
    pub value: U256,
    /// Pass-through offset metadata from the request.
    pub position: U256,
    /// Payload bytes as forwarded.
    pub payload: Vec<u8>,
}

/// Successful result of a forwarded invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallOutcome {
    /// Bytes returned by the destination, empty when it returned nothing.
    pub return_data: Vec<u8>,
}

/// Construction-time forwarder configuration.
///
/// Set once when the service is built and immutable thereafter; there is no
/// ownership rotation.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwarderConfig {
    /// Network/context identifier bound into the domain separator.
    pub chain_id: u64,
    /// The forwarder's own identity, also bound into the domain separator.
    #[serde_as(as = "Bytes")]
    pub forwarder: Address,
    /// The sole privileged principal.
    #[serde_as(as = "Bytes")]
    pub owner: Address,
}

impl ForwardRequest {
    /// Convenience constructor for a value-only transfer (empty payload).
    #[must_use]
    pub fn transfer(destination: Address, value: U256, nonce: u64, expiry: U256) -> Self {
        Self {
            expiry,
            nonce,
            destination,
            value,
            position: U256::zero(),
            payload: Vec::new(),
        }
    }
}
