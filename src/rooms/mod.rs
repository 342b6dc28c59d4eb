mod delete;
mod edit;
mod msg;
mod new;
mod room;

use askama::Template;
use axum::{response::{Html, IntoResponse, Response}, routing::get, Router};
use uuid::Uuid;

use crate::{db::{TopicRow, User}, forms::RoomForm, AppResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/room/{id}", get(room::room).post(room::post_message))
        .route("/create-room/", get(new::create_room_page).post(new::create_room))
        .route("/update-room/{id}", get(edit::update_room_page).post(edit::update_room))
        .route("/delete-room/{id}", get(delete::delete_room_page).post(delete::delete_room))
        .route("/delete-message/{id}", get(msg::delete_message_page).post(msg::delete_message))
}

#[derive(Template)]
#[template(path = "room_form.html")]
struct RoomFormTemplate<'a> {
    caller: Option<User>,
    room_id: Option<Uuid>,
    topic_name: &'a str,
    name: &'a str,
    description: &'a str,
    topics: Vec<TopicRow>,
    errors: Vec<String>,
}

/// The create/update form, prefilled from `form`.
fn room_form_page(
    caller: User,
    room_id: Option<Uuid>,
    form: &RoomForm,
    topics: Vec<TopicRow>,
    errors: Vec<String>,
) -> AppResult<Response> {
    let page = RoomFormTemplate {
        caller: Some(caller),
        room_id,
        topic_name: &form.topic,
        name: &form.name,
        description: &form.description,
        topics,
        errors,
    };
    Ok(Html(page.render()?).into_response())
}

#[derive(Template)]
#[template(path = "delete.html")]
struct DeleteTemplate<'a> {
    caller: Option<User>,
    obj: &'a str,
    back: &'a str,
}

fn confirm_delete_page(caller: User, obj: &str, back: &str) -> AppResult<Response> {
    let page = DeleteTemplate {
        caller: Some(caller),
        obj,
        back,
    };
    Ok(Html(page.render()?).into_response())
}
