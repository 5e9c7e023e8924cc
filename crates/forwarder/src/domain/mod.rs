//! # Domain Layer
//!
//! Pure authorization logic, no I/O: digest construction, signer recovery,
//! nonce bookkeeping, and the expiry inequality.

pub mod digest;
pub mod ecdsa;
pub mod errors;
pub mod expiry;
pub mod nonce;
