//! # Shared Types Crate
//!
//! This crate contains the domain entities shared between the forwarder
//! subsystem and anything that embeds or observes it.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Immutable Requests**: A `ForwardRequest` never changes after
//!   construction; only the forwarder's nonce ledger mutates.
//! - **Opaque Payloads**: Payload bytes are carried verbatim; this crate
//!   assigns them no meaning.

pub mod entities;

pub use entities::*;
