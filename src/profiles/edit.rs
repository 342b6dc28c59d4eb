use askama::Template;
use axum::{
    debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{self, users::ProfileUpdate, User},
    forms::ProfileForm,
    parse_id, session, AppResult,
};

#[derive(Template)]
#[template(path = "edit_user.html")]
struct EditUserTemplate {
    caller: Option<User>,
    user_id: Uuid,
    form: ProfileForm,
}

fn edit_user_form(caller: User, form: ProfileForm) -> AppResult<Response> {
    let page = EditUserTemplate {
        user_id: caller.id,
        caller: Some(caller),
        form,
    };
    Ok(Html(page.render()?).into_response())
}

// The path id is only for the URL shape: a user can only ever edit themselves.
#[debug_handler]
pub(crate) async fn edit_user_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(user_id): Path<String>,
) -> AppResult<Response> {
    let user_id = parse_id(&user_id, "profile")?;
    let Some(caller) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect(&format!("/edit-user/{user_id}")));
    };

    let form = ProfileForm {
        username: caller.username.clone(),
        email: caller.email.clone(),
        bio: caller.bio.clone(),
        avatar: caller.avatar.clone(),
    };
    edit_user_form(caller, form)
}

#[debug_handler]
pub(crate) async fn edit_user(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Path(user_id): Path<String>,

    Form(form): Form<ProfileForm>,
) -> AppResult<Response> {
    let user_id = parse_id(&user_id, "profile")?;
    let Some(caller) = session::current_user(&session, &db_pool).await? else {
        return Ok(session::login_redirect(&format!("/edit-user/{user_id}")));
    };

    let form = ProfileForm {
        username: form.username.trim().to_owned(),
        ..form
    };
    if form.validate().is_err() || db::users::username_taken(&db_pool, &form.username, Some(caller.id)).await? {
        return edit_user_form(caller, form);
    }

    let update = ProfileUpdate {
        username: &form.username,
        email: &form.email,
        bio: &form.bio,
        avatar: &form.avatar,
    };
    match db::users::update_profile(&db_pool, caller.id, update).await {
        Ok(()) => {}
        Err(err) if db::users::is_unique_violation(&err) => return edit_user_form(caller, form),
        Err(err) => return Err(err.into()),
    }
    tracing::info!(user_id = %caller.id, "profile updated");

    Ok(Redirect::to(&format!("/profile/{}", caller.id)).into_response())
}
