//! Message publish, edit, delete, and reaction handlers — the callers of
//! the fan-out router.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use tracing::info;

use chancast_core::error::AppError;
use chancast_core::traits::notify::WebhookAction;
use chancast_core::types::message::ChannelMessage;
use chancast_core::types::privilege::Privilege;
use chancast_realtime::push::PushKind;

use crate::dto::{NewMessageRequest, ReactionRequest, StatusResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/admin/new — publish a message (Writer).
///
/// A future-dated message goes into the pending scheduled set and is
/// previewed to writers; a live message is persisted and fanned out to
/// everyone.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewMessageRequest>,
) -> ApiResult<Json<ChannelMessage>> {
    auth.require(Privilege::Writer)?;

    let now = Utc::now();
    let timestamp = body.timestamp.unwrap_or(now);

    let mut message = ChannelMessage::new(
        body.message_type,
        auth.name.clone(),
        auth.user_id.clone(),
        timestamp,
        body.text,
    );
    message.file = body.file;
    message.is_ads = body.is_ads;

    if timestamp > now {
        let pending = state.scheduled.load_pending().await?;
        let mut messages = pending.messages;
        messages.push(message.clone());

        if !state.scheduled.save_pending(messages, pending.version).await? {
            return Err(AppError::conflict(
                "Pending scheduled set changed, reload and retry",
            )
            .into());
        }

        state
            .engine
            .router()
            .deliver(PushKind::MessageBeforeScheduling, &message);
        info!(author_id = %message.author_id, "Message scheduled");
        return Ok(Json(message));
    }

    message.id = state.messages.next_message_id().await?;
    state.messages.persist_message(&message, false).await?;

    state.engine.router().deliver(PushKind::NewMessage, &message);
    notify_webhook(&state, WebhookAction::Create, &message);
    notify_push(&state, &message);

    info!(message_id = message.id, author_id = %message.author_id, "Message published");
    Ok(Json(message))
}

/// POST /api/admin/edit-message — edit a message (Writer).
pub async fn edit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(mut message): Json<ChannelMessage>,
) -> ApiResult<Json<StatusResponse>> {
    auth.require(Privilege::Writer)?;

    message.last_edit = Some(Utc::now());
    state.messages.persist_message(&message, true).await?;

    state.engine.router().deliver(PushKind::EditMessage, &message);
    notify_webhook(&state, WebhookAction::Update, &message);

    info!(message_id = message.id, "Message edited");
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/admin/delete-message/{id} — tombstone-delete a message (Writer).
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<StatusResponse>> {
    auth.require(Privilege::Writer)?;

    state.messages.delete_message(id).await?;

    let tombstone = ChannelMessage::tombstone(id);
    state
        .engine
        .router()
        .deliver(PushKind::DeleteMessage, &tombstone);
    notify_webhook(&state, WebhookAction::Delete, &tombstone);

    info!(message_id = id, "Message deleted");
    Ok(Json(StatusResponse::ok()))
}

/// POST /api/reactions — fan out a reaction change.
///
/// Reaction storage itself belongs to an external collaborator; this handler
/// re-reads the stored message and distributes it.
pub async fn react(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<ReactionRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let message = state
        .messages
        .message_by_id(body.message_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Message {} not found", body.message_id)))?;

    state.engine.router().deliver(PushKind::Reaction, &message);
    Ok(Json(StatusResponse::ok()))
}

fn notify_webhook(state: &AppState, action: WebhookAction, message: &ChannelMessage) {
    let webhook = Arc::clone(&state.webhook);
    let message = message.clone();
    tokio::spawn(async move {
        webhook.notify(action, &message).await;
    });
}

fn notify_push(state: &AppState, message: &ChannelMessage) {
    let push = Arc::clone(&state.push);
    let message = message.clone();
    tokio::spawn(async move {
        push.notify(&message).await;
    });
}
