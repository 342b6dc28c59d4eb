use axum::{debug_handler, extract::State, response::{IntoResponse, Redirect, Response}, Form};
use sqlx::SqlitePool;
use tower_sessions::Session;
use validator::Validate;

use crate::{db, forms::{self, RoomForm}, session, AppResult};

use super::room_form_page;

#[debug_handler]
pub(crate) async fn create_room_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let Some(caller) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect("/create-room/"));
    };

    let topics = db::topics::all(&db_pool).await?;
    room_form_page(caller, None, &RoomForm::default(), topics, Vec::new())
}

#[debug_handler]
pub(crate) async fn create_room(
    State(db_pool): State<SqlitePool>,
    session: Session,

    Form(form): Form<RoomForm>,
) -> AppResult<Response> {
    let Some(caller) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect("/create-room/"));
    };

    let form = form.trimmed();
    if let Err(errors) = form.validate() {
        let topics = db::topics::all(&db_pool).await?;
        return room_form_page(caller, None, &form, topics, forms::messages(&errors));
    }

    let topic = db::topics::get_or_create(&db_pool, &form.topic).await?;
    let room = db::rooms::create(&db_pool, caller.id, topic.id, &form.name, &form.description).await?;
    tracing::info!(room_id = %room.id, host = %caller.username, topic = %topic.name, "room created");

    Ok(Redirect::to("/").into_response())
}
