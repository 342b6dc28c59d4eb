mod edit;
mod page;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile/{id}", get(page::profile))
        .route("/edit-user/{id}", get(edit::edit_user_page).post(edit::edit_user))
}
