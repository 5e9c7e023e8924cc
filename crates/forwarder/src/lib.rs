//! # Authorized Call Forwarder
//!
//! A gateway that forwards arbitrary downstream invocations (destination,
//! value, payload) on behalf of a single owner principal, in two modes:
//!
//! - **direct**: the ambient caller must be the owner
//! - **delegated**: anyone may submit, carrying the owner's ECDSA signature
//!   over a domain-separated digest of the exact request, plus anti-replay
//!   metadata (per-owner monotonic nonce and an absolute expiry)
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): pure logic — digest construction, signer
//!   recovery, nonce bookkeeping, expiry check. No I/O.
//! - **Ports Layer** (`ports/`): trait definitions for the inbound API and
//!   the outbound executor/clock/audit dependencies
//! - **Adapters Layer** (`adapters/`): in-memory executor, clocks, and the
//!   broadcast audit bus
//! - **Service Layer** (`service.rs`): wires domain logic to ports
//!
//! ## Security Notes
//!
//! - **Commit-Before-Execute**: the owner's nonce is consumed before the
//!   forwarded call runs, so reentrant payloads cannot replay it, and a
//!   failed downstream call still burns its nonce
//! - **Domain Separation**: signatures bind to one (chain id, forwarder)
//!   deployment and cannot be replayed in another context
//! - **Malleability Prevention (EIP-2)**: high-S signatures are rejected

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::bus::{BroadcastAuditBus, NullAuditSink};
pub use adapters::clock::{ManualClock, SystemClock};
pub use adapters::executor::{InMemoryCallExecutor, PayloadHandler};
pub use domain::digest::{build_digest, domain_separator, keccak256};
pub use domain::ecdsa::recover_signer;
pub use domain::errors::{ForwarderError, SignatureError};
pub use domain::nonce::NonceLedger;
pub use ports::inbound::ForwarderApi;
pub use ports::outbound::{AuditSink, CallExecutor, Clock, ExecutorError};
pub use service::ForwarderService;
