//! # Expiry Guard
//!
//! Pure validity-window check. No sentinel values are special-cased:
//! `U256::MAX` never expires simply because no clock reaches it, and an
//! expiry of zero is dead on arrival by the same inequality.

use shared_types::U256;

/// True when `now` has reached or passed `expiry`.
#[must_use]
pub fn is_expired(expiry: U256, now: u64) -> bool {
    U256::from(now) >= expiry
}
