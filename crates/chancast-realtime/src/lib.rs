//! # chancast-realtime
//!
//! Real-time SSE distribution engine for ChannelCast. Provides:
//!
//! - Subscriber registry (hub) with per-listener bounded queues
//! - Privilege-filtered fan-out with non-blocking delivery
//! - Per-connection streaming sessions (heartbeat, drain, cancellation)
//! - Live/peak connection statistics tracking

pub mod engine;
pub mod hub;
pub mod listener;
pub mod metrics;
pub mod push;
pub mod router;
pub mod session;
pub mod stats;

pub use engine::BroadcastEngine;
pub use hub::Hub;
pub use listener::{Listener, ListenerId};
pub use push::PushKind;
pub use router::EventRouter;
pub use session::SseSession;
pub use stats::StatsTracker;
