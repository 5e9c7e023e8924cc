//! # Authorization Digest Construction
//!
//! Builds the fixed-size digest the owner signs to delegate a forwarded
//! call. The layout is the EIP-191/712 "\x19\x01" scheme:
//!
//! ```text
//! digest = keccak256(0x19 || 0x01 || domain_separator || struct_hash)
//! struct_hash = keccak256(expiry || nonce || destination || value
//!                         || position || payload)
//! ```
//!
//! Integer fields are 32-byte big-endian words, the destination is 20 raw
//! bytes, and the payload is appended raw (length-implicit via hashing).
//! The domain separator binds a signature to one (chain id, forwarder)
//! deployment so it cannot be replayed in another context.
//!
//! Everything here is pure and infallible.

use sha3::{Digest, Keccak256};
use shared_types::{Address, ForwardRequest, Hash, U256};

/// EIP-191 version prefix for structured-data signing.
const DIGEST_PREFIX: [u8; 2] = [0x19, 0x01];

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Encode a U256 as a 32-byte big-endian word.
fn u256_word(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// Derive the forwarder's domain separator.
///
/// `keccak256(abi.encode(uint256 chain_id, address forwarder))`: the chain
/// id as a 32-byte word followed by the forwarder address left-padded to a
/// 32-byte word. Computed once at construction and constant for the
/// forwarder's lifetime.
pub fn domain_separator(chain_id: u64, forwarder: Address) -> Hash {
    let mut encoded = [0u8; 64];
    encoded[..32].copy_from_slice(&u256_word(U256::from(chain_id)));
    encoded[44..].copy_from_slice(&forwarder);
    keccak256(&encoded)
}

/// Build the authorization digest for a request under a domain separator.
///
/// Two requests differing in any field produce different digests with
/// overwhelming probability. The payload is not length-prefixed; callers
/// must avoid payload framings that collide byte-for-byte.
pub fn build_digest(domain_separator: &Hash, request: &ForwardRequest) -> Hash {
    let mut packed = Vec::with_capacity(4 * 32 + 20 + request.payload.len());
    packed.extend_from_slice(&u256_word(request.expiry));
    packed.extend_from_slice(&u256_word(U256::from(request.nonce)));
    packed.extend_from_slice(&request.destination);
    packed.extend_from_slice(&u256_word(request.value));
    packed.extend_from_slice(&u256_word(request.position));
    packed.extend_from_slice(&request.payload);
    let struct_hash = keccak256(&packed);

    let mut preimage = Vec::with_capacity(2 + 32 + 32);
    preimage.extend_from_slice(&DIGEST_PREFIX);
    preimage.extend_from_slice(domain_separator);
    preimage.extend_from_slice(&struct_hash);
    keccak256(&preimage)
}
