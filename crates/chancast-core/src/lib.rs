//! # chancast-core
//!
//! Core crate for ChannelCast. Contains configuration schemas, domain types,
//! the collaborator trait interfaces (storage, notification, session
//! resolution), and the unified error system.
//!
//! This crate has **no** internal dependencies on other ChannelCast crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
