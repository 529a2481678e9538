//! Session resolution interface.
//!
//! Authentication and session management are external collaborators; the
//! core only needs a privilege snapshot (and author attribution) for the
//! connecting user.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::privilege::PrivilegeSet;

/// Resolved caller context: identity plus the privilege snapshot captured
/// for the lifetime of a streaming session.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Stable user identity.
    pub user_id: String,
    /// Public display name, used for message attribution.
    pub name: String,
    /// Privilege snapshot.
    pub privileges: PrivilegeSet,
}

impl AuthContext {
    /// Anonymous reader context.
    pub fn anonymous() -> Self {
        Self {
            user_id: String::new(),
            name: String::new(),
            privileges: PrivilegeSet::reader(),
        }
    }
}

/// Maps a bearer credential to a caller context.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Resolve the caller context for an optional bearer token.
    ///
    /// Implementations decide whether a missing or unknown token yields an
    /// anonymous context or an authentication error.
    async fn resolve(&self, bearer: Option<&str>) -> AppResult<AuthContext>;
}
