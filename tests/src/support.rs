//! # Test Support
//!
//! Keypair generation, low-S recoverable signing, and standard service
//! wiring shared by the integration modules.

use forwarder::adapters::bus::BroadcastAuditBus;
use forwarder::adapters::clock::ManualClock;
use forwarder::adapters::executor::InMemoryCallExecutor;
use forwarder::domain::ecdsa::address_from_pubkey;
use forwarder::service::ForwarderService;
use k256::ecdsa::{RecoveryId, SigningKey};
use shared_types::{Address, EcdsaSignature, ForwardRequest, ForwarderConfig, Hash, U256};
use std::sync::{Arc, Once};

static TRACING: Once = Once::new();

/// Install the env-filtered test subscriber; later calls are no-ops.
///
/// Run with `RUST_LOG=forwarder=debug cargo test` to see service traces.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Chain id used across the suite.
pub const CHAIN_ID: u64 = 1;

/// The forwarder's own identity, source account for value transfers.
pub const FORWARDER_ADDR: Address = [0xF0; 20];

/// A signing identity with its derived address.
pub struct TestSigner {
    key: SigningKey,
    pub address: Address,
}

impl TestSigner {
    /// Generate a fresh random identity.
    pub fn random() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let address = address_from_pubkey(key.verifying_key());
        Self { key, address }
    }

    /// Sign a digest, normalizing to low-S form so the verifier accepts it.
    pub fn sign_digest(&self, digest: &Hash) -> EcdsaSignature {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(digest)
            .expect("signing failed");

        let (sig, recid) = match sig.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::from_byte(recid.to_byte() ^ 1).expect("recovery id flip"),
            ),
            None => (sig, recid),
        };

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        EcdsaSignature {
            r,
            s,
            v: recid.to_byte() + 27,
        }
    }
}

/// A fully wired forwarder with handles on every collaborator.
pub struct TestRig {
    pub service: Arc<ForwarderService<Arc<InMemoryCallExecutor>>>,
    pub executor: Arc<InMemoryCallExecutor>,
    pub clock: Arc<ManualClock>,
    pub audit: Arc<BroadcastAuditBus>,
    pub owner: TestSigner,
}

impl TestRig {
    /// Wire a service for `owner` over a fresh in-memory substrate.
    pub fn new() -> Self {
        init_tracing();

        let owner = TestSigner::random();
        let executor = Arc::new(InMemoryCallExecutor::new(FORWARDER_ADDR));
        let clock = Arc::new(ManualClock::at(1_000));
        let audit = Arc::new(BroadcastAuditBus::new());

        let service = Arc::new(ForwarderService::new(
            ForwarderConfig {
                chain_id: CHAIN_ID,
                forwarder: FORWARDER_ADDR,
                owner: owner.address,
            },
            executor.clone(),
            clock.clone(),
            audit.clone(),
        ));

        Self {
            service,
            executor,
            clock,
            audit,
            owner,
        }
    }

    /// Owner-signed signature over `request` under this rig's separator.
    pub fn owner_signature(&self, request: &ForwardRequest) -> EcdsaSignature {
        self.owner.sign_digest(&self.service.request_digest(request))
    }

    /// A well-formed request with the given nonce, never expiring.
    pub fn request(&self, nonce: u64) -> ForwardRequest {
        ForwardRequest {
            expiry: U256::MAX,
            nonce,
            destination: [0xBB; 20],
            value: U256::zero(),
            position: U256::zero(),
            payload: vec![],
        }
    }
}

impl Default for TestRig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }

    #[test]
    fn test_signer_addresses_are_distinct() {
        assert_ne!(TestSigner::random().address, TestSigner::random().address);
    }
}
