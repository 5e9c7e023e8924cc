//! # Audit Bus Adapter
//!
//! Broadcast-channel implementation of the [`AuditSink`] outbound port.
//! One event is emitted per successful forwarded call; observers subscribe
//! for their own copy of the stream. Suitable for single-process operation;
//! a distributed deployment would put a durable log behind the same port.

use crate::ports::outbound::AuditSink;
use shared_types::AuditEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Maximum events buffered per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// In-memory audit event bus over `tokio::sync::broadcast`.
pub struct BroadcastAuditBus {
    sender: broadcast::Sender<AuditEvent>,
    events_emitted: AtomicU64,
    capacity: usize,
}

impl BroadcastAuditBus {
    /// Create a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a bus with a specific per-subscriber capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_emitted: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to the audit stream. Only events emitted after this call
    /// are delivered.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuditEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Total events emitted through this bus.
    #[must_use]
    pub fn events_emitted(&self) -> u64 {
        self.events_emitted.load(Ordering::Relaxed)
    }

    /// Per-subscriber channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BroadcastAuditBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AuditSink for BroadcastAuditBus {
    async fn emit(&self, event: AuditEvent) -> usize {
        // Counts attempts, delivered or not
        self.events_emitted.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(receivers = receiver_count, "Audit event emitted");
                receiver_count
            }
            Err(_) => {
                warn!("Audit event dropped (no subscribers)");
                0
            }
        }
    }
}

/// Sink for embeddings that do not observe audit records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAuditSink;

#[async_trait::async_trait]
impl AuditSink for NullAuditSink {
    async fn emit(&self, _event: AuditEvent) -> usize {
        0
    }
}
