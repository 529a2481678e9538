//! Individual streaming-connection handle.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use chancast_core::types::privilege::PrivilegeSet;

/// Unique listener identifier.
pub type ListenerId = Uuid;

/// A handle to a single live streaming session.
///
/// Holds the privilege snapshot captured at connect time, the bounded
/// outbound queue of serialized push payloads, and a lifecycle token.
/// Owned by its streaming session; the hub keeps a reference for fan-out.
#[derive(Debug)]
pub struct Listener {
    /// Unique listener ID.
    id: ListenerId,
    /// Privilege snapshot, fixed for the life of the session.
    privileges: PrivilegeSet,
    /// When the listener connected.
    connected_at: DateTime<Utc>,
    /// Sender side of the bounded outbound queue.
    tx: mpsc::Sender<String>,
    /// Lifecycle token; cancelled exactly once, on close.
    closed: CancellationToken,
}

impl Listener {
    /// Create a listener with a bounded queue of the given depth.
    pub(crate) fn new(privileges: PrivilegeSet, queue_capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(queue_capacity);
        let listener = Self {
            id: Uuid::new_v4(),
            privileges,
            connected_at: Utc::now(),
            tx,
            closed: CancellationToken::new(),
        };
        (listener, rx)
    }

    /// The listener's identity.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// The privilege snapshot captured at connect time.
    pub fn privileges(&self) -> PrivilegeSet {
        self.privileges
    }

    /// When the listener connected.
    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    /// Attempt a non-blocking enqueue of a serialized push payload.
    ///
    /// Returns `false` without blocking if the listener is closed or its
    /// queue is at capacity; a full queue drops the payload for this
    /// listener only.
    pub fn enqueue(&self, payload: String) -> bool {
        if self.closed.is_cancelled() {
            return false;
        }
        match self.tx.try_send(payload) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(listener_id = %self.id, "Listener queue full, dropping payload");
                false
            }
            Err(TrySendError::Closed(_)) => {
                self.close();
                false
            }
        }
    }

    /// Mark the listener closed. Idempotent.
    pub fn close(&self) {
        self.closed.cancel();
    }

    /// Whether the listener has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Resolves once the listener has been closed.
    pub async fn wait_closed(&self) {
        self.closed.cancelled().await;
    }
}
