use axum::{
    debug_handler,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use validator::Validate;

use crate::{
    access, db,
    forms::{self, RoomForm},
    parse_id, session, AppError, AppResult,
};

use super::room_form_page;

#[debug_handler]
pub(crate) async fn update_room_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<String>,
) -> AppResult<Response> {
    let room_id = parse_id(&room_id, "room")?;
    let Some(caller) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect(&format!("/update-room/{room_id}")));
    };

    let room = db::rooms::find(&db_pool, room_id)
        .await?
        .ok_or(AppError::NotFound("room"))?;
    access::ensure(access::can_edit_room(Some(&caller), &room))?;

    let topic = db::topics::find(&db_pool, room.topic_id)
        .await?
        .ok_or(AppError::NotFound("topic"))?;
    let form = RoomForm {
        topic: topic.name,
        name: room.name,
        description: room.description,
    };

    let topics = db::topics::all(&db_pool).await?;
    room_form_page(caller, Some(room.id), &form, topics, Vec::new())
}

#[debug_handler]
pub(crate) async fn update_room(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(room_id): Path<String>,

    Form(form): Form<RoomForm>,
) -> AppResult<Response> {
    let room_id = parse_id(&room_id, "room")?;
    let Some(caller) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect(&format!("/update-room/{room_id}")));
    };

    let room = db::rooms::find(&db_pool, room_id)
        .await?
        .ok_or(AppError::NotFound("room"))?;
    if !access::can_edit_room(Some(&caller), &room) {
        tracing::warn!(room_id = %room.id, user = %caller.username, "rejected room update by non-host");
        return Err(AppError::PermissionDenied);
    }

    let form = form.trimmed();
    if let Err(errors) = form.validate() {
        let topics = db::topics::all(&db_pool).await?;
        return room_form_page(caller, Some(room.id), &form, topics, forms::messages(&errors));
    }

    let topic = db::topics::get_or_create(&db_pool, &form.topic).await?;
    db::rooms::update(&db_pool, room.id, topic.id, &form.name, &form.description).await?;
    tracing::info!(room_id = %room.id, "room updated");

    Ok(Redirect::to(&format!("/room/{}", room.id)).into_response())
}
