//! Connection statistics handler (Moderator).

use axum::Json;
use axum::extract::State;

use chancast_core::types::privilege::Privilege;

use crate::dto::StatisticsResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/statistics — live count, all-time peak, recent samples.
pub async fn statistics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<StatisticsResponse>> {
    auth.require(Privilege::Moderator)?;

    let samples = state
        .stats
        .recent_samples(state.config.realtime.statistics_sample_limit)
        .await?;

    Ok(Json(StatisticsResponse {
        connected_listeners: state.engine.hub().count() as u64,
        peak: state.engine.stats().peak(),
        samples,
    }))
}
