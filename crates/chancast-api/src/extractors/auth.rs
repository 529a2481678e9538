//! `AuthUser` extractor — resolves the caller's privilege snapshot.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use chancast_core::error::AppError;
use chancast_core::traits::auth::AuthContext;
use chancast_core::types::privilege::Privilege;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted caller context available in handlers.
///
/// Delegates to the `SessionResolver` collaborator; the resolved privilege
/// set is the snapshot a new streaming session will carry for its lifetime.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

impl AuthUser {
    /// Require a privilege, rejecting the request with 403 otherwise.
    pub fn require(&self, privilege: Privilege) -> Result<(), AppError> {
        if self.0.privileges.contains(privilege) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Caller lacks the {privilege} privilege"
            )))
        }
    }
}

impl std::ops::Deref for AuthUser {
    type Target = AuthContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let context = state.sessions.resolve(bearer).await?;
        Ok(AuthUser(context))
    }
}
