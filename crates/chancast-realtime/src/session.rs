//! Per-connection SSE streaming session.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::Stream;
use futures::stream;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use chancast_core::types::privilege::PrivilegeSet;

use crate::hub::Hub;
use crate::listener::Listener;
use crate::push::HEARTBEAT_PAYLOAD;

/// Format one server-push text frame.
pub fn sse_frame(payload: &str) -> String {
    format!("data: {payload}\n\n")
}

/// Unregisters the listener when the session ends, on every exit path:
/// stream completion, client disconnect, or a transport write failure that
/// makes the transport drop the stream.
struct SessionGuard {
    hub: Arc<Hub>,
    listener: Arc<Listener>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        debug!(listener_id = %self.listener.id(), "Streaming session closed");
        self.hub.unregister(self.listener.id());
    }
}

/// One live streaming session: owns the listener's queue receiver and turns
/// it into a stream of SSE wire frames.
///
/// The stream yields an immediate heartbeat frame on connect, then waits on
/// three sources: listener closure (forced shutdown or unregistration), the
/// heartbeat timer, and the outbound queue. Closure always wins over pending
/// payloads, so nothing is written after the listener is closed.
pub struct SseSession {
    guard: SessionGuard,
    rx: mpsc::Receiver<String>,
    heartbeat: time::Interval,
}

enum Step {
    Closed,
    Heartbeat,
    Payload(String),
}

impl SseSession {
    /// Register a new listener on the hub and open its session.
    pub fn connect(hub: Arc<Hub>, privileges: PrivilegeSet, heartbeat_interval: Duration) -> Self {
        let (listener, rx) = hub.register(privileges);
        // The first tick fires immediately, producing the connect heartbeat.
        let mut heartbeat = time::interval(heartbeat_interval);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            guard: SessionGuard { hub, listener },
            rx,
            heartbeat,
        }
    }

    /// The listener handle backing this session.
    pub fn listener(&self) -> &Arc<Listener> {
        &self.guard.listener
    }

    /// Convert the session into a stream of SSE wire frames.
    ///
    /// The stream ends when the listener is closed; dropping it mid-flight
    /// (client disconnect, write failure) unregisters the listener as well.
    pub fn into_stream(self) -> impl Stream<Item = String> + Send {
        stream::unfold(self, |mut session| async move {
            let step = tokio::select! {
                biased;
                _ = session.guard.listener.wait_closed() => Step::Closed,
                _ = session.heartbeat.tick() => Step::Heartbeat,
                maybe_payload = session.rx.recv() => match maybe_payload {
                    Some(payload) => Step::Payload(payload),
                    None => Step::Closed,
                },
            };

            match step {
                Step::Closed => None,
                Step::Heartbeat => Some((sse_frame(HEARTBEAT_PAYLOAD), session)),
                Step::Payload(payload) => Some((sse_frame(&payload), session)),
            }
        })
    }
}
