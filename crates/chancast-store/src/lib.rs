//! # chancast-store
//!
//! Single-node, in-process implementations of the ChannelCast collaborator
//! interfaces: in-memory message / scheduled / statistics stores, log-only
//! webhook and push notifiers, and a static bearer-token session resolver.
//!
//! Production deployments substitute their own implementations of the
//! `chancast-core::traits` interfaces; these are used by the standalone
//! server binary and the test suite.

pub mod auth;
pub mod memory;
pub mod notify;

pub use auth::StaticSessionResolver;
pub use memory::{MemoryMessageStore, MemoryScheduledStore, MemoryStatsStore};
pub use notify::{LogPushNotifier, LogWebhookNotifier};
