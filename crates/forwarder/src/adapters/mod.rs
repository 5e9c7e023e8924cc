//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports: an in-memory execution
//! substrate, clock sources, and the broadcast audit bus.

pub mod bus;
pub mod clock;
pub mod executor;
