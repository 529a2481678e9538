//! SSE connect entrypoint.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{self, HeaderName};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use tracing::debug;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/events — open a long-lived SSE stream.
///
/// The caller's privilege snapshot is captured here and fixed for the life
/// of the connection. The stream emits an immediate heartbeat frame, then
/// heartbeats every 25 seconds interleaved with push payloads. Client
/// disconnects and write failures end the session; there is no resume
/// protocol (backfill is the paginated fetch collaborator's job).
pub async fn events(State(state): State<AppState>, auth: AuthUser) -> Response {
    debug!(user_id = %auth.user_id, "Opening event stream");

    let session = state.engine.connect(auth.privileges);
    let frames = session.into_stream().map(Ok::<_, Infallible>);

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
            (HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        Body::from_stream(frames),
    )
        .into_response()
}
