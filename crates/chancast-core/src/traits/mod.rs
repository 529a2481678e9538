//! Collaborator trait interfaces.
//!
//! The distribution core consumes storage, notification, and session
//! resolution through these narrow interfaces; concrete implementations live
//! outside the core (see `chancast-store` for the single-node ones).

pub mod auth;
pub mod notify;
pub mod storage;

pub use auth::{AuthContext, SessionResolver};
pub use notify::{PushNotifier, WebhookAction, WebhookNotifier};
pub use storage::{MessageStore, ScheduledStore, StatsStore};
