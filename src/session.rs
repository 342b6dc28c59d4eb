use axum::response::{IntoResponse, Redirect, Response};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{db::{self, User}, AppResult};

pub const USER_ID: &str = "user_id";

/// The logged-in user for this request, if any.
///
/// A session pointing at a user that no longer exists is treated as anonymous
/// and the stale id is dropped.
pub async fn current_user(session: &Session, db_pool: &SqlitePool) -> AppResult<Option<User>> {
    let Some(user_id) = session.get::<Uuid>(USER_ID).await? else {
        return Ok(None);
    };

    let user = db::users::find(db_pool, user_id).await?;
    if user.is_none() {
        session.remove::<Uuid>(USER_ID).await?;
    }
    Ok(user)
}

pub async fn log_in(session: &Session, user: &User) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(USER_ID, user.id).await?;
    Ok(())
}

pub async fn log_out(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}

pub fn login_redirect(return_url: &str) -> Response {
    Redirect::to(&format!("/login/?return_url={return_url}")).into_response()
}

/// Only same-site absolute paths are followed after login.
pub fn safe_return_url(return_url: Option<String>) -> String {
    match return_url {
        Some(url)
            if url.starts_with('/')
                && !url.starts_with("//")
                && url.chars().all(|c| c.is_ascii_graphic() && c != '\\') =>
        {
            url
        }
        _ => "/".to_owned(),
    }
}
