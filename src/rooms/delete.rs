use axum::{
    debug_handler,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{access, db, parse_id, session, AppError, AppResult};

use super::confirm_delete_page;

#[debug_handler]
pub(crate) async fn delete_room_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<String>,
) -> AppResult<Response> {
    let room_id = parse_id(&room_id, "room")?;
    let Some(caller) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect(&format!("/delete-room/{room_id}")));
    };

    let room = db::rooms::find(&db_pool, room_id)
        .await?
        .ok_or(AppError::NotFound("room"))?;
    access::ensure(access::can_delete_room(Some(&caller), &room))?;

    confirm_delete_page(caller, &room.name, &format!("/room/{}", room.id))
}

#[debug_handler]
pub(crate) async fn delete_room(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<String>,
) -> AppResult<Response> {
    let room_id = parse_id(&room_id, "room")?;
    let Some(caller) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect(&format!("/delete-room/{room_id}")));
    };

    let room = db::rooms::find(&db_pool, room_id)
        .await?
        .ok_or(AppError::NotFound("room"))?;
    access::ensure(access::can_delete_room(Some(&caller), &room))?;

    db::rooms::delete(&db_pool, room.id).await?;
    tracing::info!(room_id = %room.id, host = %caller.username, "room deleted");

    Ok(Redirect::to("/").into_response())
}
