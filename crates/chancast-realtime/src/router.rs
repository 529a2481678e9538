//! Fan-out router — classifies an event and delivers it to matching listeners.

use std::sync::Arc;

use tracing::{debug, error};

use chancast_core::types::message::ChannelMessage;

use crate::hub::Hub;
use crate::metrics::FanoutMetrics;
use crate::push::{PushEnvelope, PushKind};

/// Delivers push events to all matching listeners in one bounded pass.
///
/// The envelope is serialized once per call. Recipients are selected from a
/// hub snapshot and enqueued without blocking, so a stalled consumer can
/// delay neither registry mutation nor delivery to other listeners.
#[derive(Debug)]
pub struct EventRouter {
    /// Subscriber registry.
    hub: Arc<Hub>,
    /// Fan-out counters.
    metrics: Arc<FanoutMetrics>,
}

impl EventRouter {
    /// Create a router over the given hub.
    pub fn new(hub: Arc<Hub>, metrics: Arc<FanoutMetrics>) -> Self {
        Self { hub, metrics }
    }

    /// Deliver one event to every listener matching the kind's audience.
    ///
    /// Listeners registered after this call begins are not guaranteed to
    /// receive the event; listeners registered before it are, provided they
    /// stay registered for the duration of the pass.
    pub fn deliver(&self, kind: PushKind, message: &ChannelMessage) {
        let payload = match PushEnvelope::new(kind, message).to_json() {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Failed to serialize push envelope");
                return;
            }
        };

        let audience = kind.audience();
        let listeners = self.hub.snapshot();

        let mut delivered = 0u64;
        let mut dropped = 0u64;
        for listener in &listeners {
            if !audience.includes(listener.privileges()) {
                continue;
            }
            if listener.enqueue(payload.clone()) {
                delivered += 1;
            } else {
                dropped += 1;
            }
        }

        self.metrics.record_fanout(delivered, dropped);
        debug!(
            kind = kind.wire_label(),
            message_id = message.id,
            delivered,
            dropped,
            "Fan-out pass complete"
        );
    }
}
