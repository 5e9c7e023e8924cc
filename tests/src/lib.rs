//! # Call-Forwarder Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Keypairs, signing, service wiring helpers
//! └── integration/      # Cross-component flows
//!     ├── flows.rs      # Authorization, forwarding, value transfer
//!     ├── adversarial.rs# Replay, tampering, foreign signers, expiry
//!     └── concurrency.rs# Same-nonce races and reentrancy
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p forwarder-tests
//!
//! # By category
//! cargo test -p forwarder-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod support;
