//! Pending scheduled-set management handlers (Writer).

use axum::Json;
use axum::extract::State;

use chancast_core::error::AppError;
use chancast_core::types::privilege::Privilege;
use chancast_core::types::scheduled::PendingScheduled;

use crate::dto::{ReplacePendingRequest, StatusResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/scheduled — read the pending set with its version.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<PendingScheduled>> {
    auth.require(Privilege::Writer)?;
    Ok(Json(state.scheduled.load_pending().await?))
}

/// POST /api/admin/scheduled — replace the pending set wholesale.
///
/// The caller passes back the version it loaded; a stale version is
/// rejected with 409 so a concurrent scheduler tick or editor is never
/// silently overwritten.
pub async fn replace(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ReplacePendingRequest>,
) -> ApiResult<Json<StatusResponse>> {
    auth.require(Privilege::Writer)?;

    if !state
        .scheduled
        .save_pending(body.messages, body.version)
        .await?
    {
        return Err(AppError::conflict(
            "Pending scheduled set changed since it was loaded",
        )
        .into());
    }

    Ok(Json(StatusResponse::ok()))
}
