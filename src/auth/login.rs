use askama::Template;
use axum::{
    debug_handler,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{db::{self, User}, session, AppResult};

use super::password;

/// Deliberately silent about which of the two fields was wrong.
const BAD_CREDENTIALS: &str = "Username or password is incorrect";

#[derive(Deserialize)]
pub(crate) struct LoginQuery {
    pub(crate) return_url: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate<'a> {
    caller: Option<User>,
    username: &'a str,
    return_url: &'a str,
    error: Option<&'a str>,
}

fn login_form(username: &str, return_url: &str, error: Option<&str>) -> AppResult<Response> {
    let page = LoginTemplate {
        caller: None,
        username,
        return_url,
        error,
    };
    Ok(Html(page.render()?).into_response())
}

#[debug_handler]
pub(crate) async fn login_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(LoginQuery { return_url }): Query<LoginQuery>,
) -> AppResult<Response> {
    if session::current_user(&session, &db_pool).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    login_form("", &session::safe_return_url(return_url), None)
}

#[debug_handler]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(LoginQuery { return_url }): Query<LoginQuery>,

    Form(LoginForm { username, password }): Form<LoginForm>,
) -> AppResult<Response> {
    if session::current_user(&session, &db_pool).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    let return_url = session::safe_return_url(return_url);

    let user = db::users::find_by_username(&db_pool, username.trim()).await?;
    let hash = user.as_ref().map(|user| user.password_hash.clone());
    let verified = password::verify(password, hash).await?;

    match user {
        Some(user) if verified => {
            session::log_in(&session, &user).await?;
            tracing::info!(user_id = %user.id, username = %user.username, "logged in");
            Ok(Redirect::to(&return_url).into_response())
        }
        _ => {
            tracing::info!(username = %username, "failed login");
            login_form(&username, &return_url, Some(BAD_CREDENTIALS))
        }
    }
}
