use askama::Template;
use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    db::{self, MessageRow, RoomRow, User, UserSummary},
    parse_id, session, AppError, AppResult,
};

#[derive(Template)]
#[template(path = "room.html")]
struct RoomTemplate {
    caller: Option<User>,
    room: RoomRow,
    room_messages: Vec<MessageRow>,
    participants: Vec<UserSummary>,
}

#[debug_handler]
pub(crate) async fn room(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<String>,
) -> AppResult<Response> {
    let room_id = parse_id(&room_id, "room")?;
    let caller = session::current_user(&session, &db_pool).await?;

    let room = db::rooms::find_row(&db_pool, room_id)
        .await?
        .ok_or(AppError::NotFound("room"))?;

    let page = RoomTemplate {
        caller,
        room_messages: db::messages::in_room(&db_pool, room_id).await?,
        participants: db::rooms::participants(&db_pool, room_id).await?,
        room,
    };

    Ok(Html(page.render()?).into_response())
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostMessageForm {
    #[serde(default)]
    body: String,
}

#[debug_handler]
pub(crate) async fn post_message(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<String>,

    Form(PostMessageForm { body }): Form<PostMessageForm>,
) -> AppResult<Response> {
    let room_id = parse_id(&room_id, "room")?;
    let Some(caller) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect(&format!("/room/{room_id}")));
    };

    let room = db::rooms::find(&db_pool, room_id)
        .await?
        .ok_or(AppError::NotFound("room"))?;

    let message = db::messages::create(&db_pool, caller.id, room.id, &body).await?;
    db::rooms::add_participant(&db_pool, room.id, caller.id).await?;
    tracing::debug!(message_id = %message.id, room_id = %room.id, user = %caller.username, "message posted");

    Ok(Redirect::to(&format!("/room/{}", room.id)).into_response())
}
