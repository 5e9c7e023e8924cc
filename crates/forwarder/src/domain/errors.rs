//! # Forwarder Errors
//!
//! Error taxonomy for the authorization pipeline and the forwarded call.
//! Every variant is a terminal, synchronous failure of the whole request;
//! the core performs no retries.

use thiserror::Error;

/// Errors from signature parsing and signer recovery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// R or S is zero or not below the curve order
    #[error("Signature scalar out of range")]
    InvalidScalar,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Recovery produced no key, or the zero-address sentinel
    #[error("Failed to recover signer")]
    RecoveryFailed,
}

/// Errors returned by the forwarder's public operations.
///
/// Authorization failures (`Unauthorized`, `Expired`, `InvalidNonce`,
/// `InvalidSignature`) leave the nonce ledger untouched. `ExecutionFailed`
/// is the one exception: by then the nonce is already consumed and stays
/// consumed, so repeated failed submissions each cost a fresh signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForwarderError {
    /// The caller (direct mode) or recovered signer (delegated mode) is not
    /// the owner principal.
    #[error("Caller is not the owner")]
    Unauthorized,

    /// The request's validity window has elapsed.
    #[error("Request expired")]
    Expired,

    /// Presented nonce does not match the owner's expected sequence number.
    /// Covers both stale replays and out-of-order future nonces.
    #[error("Invalid nonce: expected {expected}, got {presented}")]
    InvalidNonce { expected: u64, presented: u64 },

    /// The signature is malformed or recovery failed.
    #[error("Invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    /// The downstream invocation failed; carries its reason opaquely.
    #[error("Forwarded call failed: {0}")]
    ExecutionFailed(String),
}
