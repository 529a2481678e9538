//! Static bearer-token session resolver.

use async_trait::async_trait;
use dashmap::DashMap;

use chancast_core::result::AppResult;
use chancast_core::traits::auth::{AuthContext, SessionResolver};

/// Resolves bearer tokens against a fixed in-memory table.
///
/// Unknown or missing tokens resolve to the anonymous Reader context, so a
/// standalone server accepts unauthenticated stream readers out of the box.
/// Real deployments substitute their own `SessionResolver`.
#[derive(Debug, Default)]
pub struct StaticSessionResolver {
    /// Bearer token → caller context.
    tokens: DashMap<String, AuthContext>,
}

impl StaticSessionResolver {
    /// Create a resolver with no known tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token with its caller context.
    pub fn with_token(self, token: impl Into<String>, context: AuthContext) -> Self {
        self.tokens.insert(token.into(), context);
        self
    }
}

#[async_trait]
impl SessionResolver for StaticSessionResolver {
    async fn resolve(&self, bearer: Option<&str>) -> AppResult<AuthContext> {
        let context = bearer
            .and_then(|token| self.tokens.get(token).map(|entry| entry.value().clone()))
            .unwrap_or_else(AuthContext::anonymous);
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use chancast_core::types::privilege::{Privilege, PrivilegeSet};

    use super::*;

    #[tokio::test]
    async fn test_known_token_resolves_context() {
        let resolver = StaticSessionResolver::new().with_token(
            "writer-token",
            AuthContext {
                user_id: "7".to_string(),
                name: "alice".to_string(),
                privileges: PrivilegeSet::reader().with(Privilege::Writer),
            },
        );

        let ctx = resolver.resolve(Some("writer-token")).await.unwrap();
        assert!(ctx.privileges.contains(Privilege::Writer));
        assert_eq!(ctx.name, "alice");
    }

    #[tokio::test]
    async fn test_unknown_token_is_anonymous_reader() {
        let resolver = StaticSessionResolver::new();
        let ctx = resolver.resolve(Some("nope")).await.unwrap();
        assert!(ctx.privileges.contains(Privilege::Reader));
        assert!(!ctx.privileges.contains(Privilege::Writer));

        let anon = resolver.resolve(None).await.unwrap();
        assert!(anon.privileges.contains(Privilege::Reader));
    }
}
