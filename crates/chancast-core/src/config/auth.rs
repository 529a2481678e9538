//! Static token configuration for the built-in session resolver.
//!
//! Authentication proper is an external collaborator; these settings only
//! feed the single-node `StaticSessionResolver` so that a standalone server
//! has a way to grant Writer/Admin privileges.

use serde::{Deserialize, Serialize};

/// Static bearer tokens for single-node deployments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token granting the Writer privilege.
    #[serde(default)]
    pub writer_token: Option<String>,
    /// Bearer token granting Writer, Moderator, and Admin privileges.
    #[serde(default)]
    pub admin_token: Option<String>,
}
