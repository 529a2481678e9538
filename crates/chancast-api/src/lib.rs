//! # chancast-api
//!
//! Axum HTTP surface for ChannelCast: the SSE connect entrypoint, the
//! publish/edit/delete/reaction handlers that feed the fan-out router, the
//! scheduled-set management endpoints, and the statistics endpoint.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
