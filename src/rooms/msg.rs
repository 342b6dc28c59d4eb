use axum::{
    debug_handler,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    access,
    db::{self, Message, Room, User},
    parse_id, session, AppError, AppResult,
};

use super::confirm_delete_page;

/// The message, its room, and a check that `caller` wrote it.
async fn owned_message(db_pool: &SqlitePool, caller: &User, message_id: Uuid) -> AppResult<(Message, Room)> {
    let message = db::messages::find(db_pool, message_id)
        .await?
        .ok_or(AppError::NotFound("message"))?;
    let room = db::rooms::find(db_pool, message.room_id)
        .await?
        .ok_or(AppError::NotFound("room"))?;

    access::ensure(access::can_delete_message(Some(caller), &message))?;
    Ok((message, room))
}

#[debug_handler]
pub(crate) async fn delete_message_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(message_id): Path<String>,
) -> AppResult<Response> {
    let message_id = parse_id(&message_id, "message")?;
    let Some(caller) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect(&format!("/delete-message/{message_id}")));
    };

    let (message, room) = owned_message(&db_pool, &caller, message_id).await?;
    confirm_delete_page(caller, &message.body, &format!("/room/{}", room.id))
}

#[debug_handler]
pub(crate) async fn delete_message(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(message_id): Path<String>,
) -> AppResult<Response> {
    let message_id = parse_id(&message_id, "message")?;
    let Some(caller) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect(&format!("/delete-message/{message_id}")));
    };

    let (message, room) = owned_message(&db_pool, &caller, message_id).await?;
    db::messages::delete(&db_pool, message.id).await?;
    tracing::info!(message_id = %message.id, room_id = %room.id, "message deleted");

    Ok(Redirect::to(&format!("/room/{}", room.id)).into_response())
}
