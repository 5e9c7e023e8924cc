//! # Signer Recovery (secp256k1)
//!
//! Pure domain logic for recovering the principal that signed an
//! authorization digest. Recovery alone grants nothing; the service layer
//! compares the recovered identity against the owner.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must be strictly less than half
//!   the curve order
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Zero-Address Sentinel**: a recovery that derives the zero address is
//!   treated as malformed
//! - **Constant-Time Comparisons**: scalar checks use the `subtle` crate

use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};
use shared_types::{Address, EcdsaSignature, Hash, ZERO_ADDRESS};
use subtle::{Choice, ConstantTimeEq};

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Recover the signer's address from a digest and a signature.
///
/// Deterministic and side-effect-free. Fails with a `SignatureError` when
/// the signature is malformed, recovery fails, or the recovered identity is
/// the zero address. Does not check whether the signer is authorized.
pub fn recover_signer(
    digest: &Hash,
    signature: &EcdsaSignature,
) -> Result<Address, SignatureError> {
    use zeroize::Zeroize;

    // Validate R and S are in range [1, n-1]
    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidScalar);
    }

    // Check malleability (EIP-2): S must be in lower half of curve order
    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }

    let recovery_id = parse_recovery_id(signature.v)?;

    // Construct k256 signature from r and s; the intermediate buffer is
    // zeroized on both paths
    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let sig = match Signature::from_slice(&sig_bytes) {
        Ok(s) => {
            sig_bytes.zeroize();
            s
        }
        Err(_) => {
            sig_bytes.zeroize();
            return Err(SignatureError::InvalidScalar);
        }
    };

    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    let address = address_from_pubkey(&recovered_key);

    // Zero address is the malformed-signature sentinel
    if address == ZERO_ADDRESS {
        return Err(SignatureError::RecoveryFailed);
    }

    Ok(address)
}

/// Derive the Ethereum-style address of a public key: the last 20 bytes of
/// keccak256 over the uncompressed point without its 0x04 prefix.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    let pubkey_bytes = encoded.as_bytes();

    let mut hasher = Keccak256::new();
    hasher.update(&pubkey_bytes[1..]);
    let hash = hasher.finalize();

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Check if S is in the lower half of the curve order (EIP-2).
///
/// Constant-time: the comparison runs in fixed time regardless of input.
fn is_low_s(s: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((s[i] < SECP256K1_HALF_ORDER[i]) as u8);
        let byte_greater = Choice::from((s[i] > SECP256K1_HALF_ORDER[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    // Strict inequality: s == half_order is rejected
    less.into()
}

/// Check if a scalar is in the valid range [1, n-1], constant-time.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((scalar[i] < SECP256K1_ORDER[i]) as u8);
        let byte_greater = Choice::from((scalar[i] > SECP256K1_ORDER[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (!is_zero & less).into()
}

/// Parse recovery ID from v value.
///
/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// Compute s' = n - s, the malleable twin of an S value.
#[cfg(test)]
pub(crate) fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// UNIT TESTS
// =============================================================================
