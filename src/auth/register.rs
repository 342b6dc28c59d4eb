use askama::Template;
use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use validator::Validate;

use crate::{
    db::{self, User},
    forms::{self, RegisterForm},
    session, AppResult,
};

use super::password;

const USERNAME_TAKEN: &str = "A user with that username already exists.";

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate<'a> {
    caller: Option<User>,
    username: &'a str,
    errors: Vec<String>,
}

fn register_form(username: &str, errors: Vec<String>) -> AppResult<Response> {
    let page = RegisterTemplate {
        caller: None,
        username,
        errors,
    };
    Ok(Html(page.render()?).into_response())
}

#[debug_handler]
pub(crate) async fn register_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    if session::current_user(&session, &db_pool).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    register_form("", Vec::new())
}

#[debug_handler]
pub(crate) async fn register(
    State(db_pool): State<SqlitePool>,
    session: Session,

    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if session::current_user(&session, &db_pool).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let form = RegisterForm {
        username: form.username.trim().to_owned(),
        ..form
    };

    let mut errors = match form.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => forms::messages(&errors),
    };
    if !form.username.is_empty() && db::users::username_taken(&db_pool, &form.username, None).await? {
        errors.push(USERNAME_TAKEN.to_owned());
    }
    if !errors.is_empty() {
        return register_form(&form.username, errors);
    }

    let hash = password::hash(form.password1).await?;
    let user = match db::users::create(&db_pool, &form.username, &hash).await {
        Ok(user) => user,
        Err(err) if db::users::is_unique_violation(&err) => {
            return register_form(&form.username, vec![USERNAME_TAKEN.to_owned()]);
        }
        Err(err) => return Err(err.into()),
    };

    session::log_in(&session, &user).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "registered");

    Ok(Redirect::to("/").into_response())
}
