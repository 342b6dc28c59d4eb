pub mod access;
pub mod appresult;
pub mod auth;
pub mod config;
pub mod db;
pub mod display;
pub mod forms;
pub mod index;
pub mod profiles;
pub mod res;
pub mod rooms;
pub mod session;

use axum::{extract::FromRef, routing::get, Router};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};
use uuid::Uuid;

pub use appresult::{AppError, AppResult};
pub use config::Config;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

/// Ids in paths that do not parse can never match a record.
pub(crate) fn parse_id(raw: &str, what: &'static str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(what))
}

pub fn app(state: AppState, config: &Config) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.session_secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(config.session_idle_minutes)));

    Router::new()
        .route("/", get(index::home))
        .route("/topics/", get(index::topics_page))
        .route("/activity/", get(index::activity_page))
        .route("/res/style.css", get(res::style))
        .route("/res/avatar.svg", get(res::avatar))

        .merge(auth::router())
        .merge(rooms::router())
        .merge(profiles::router())
        .fallback(res::fallback)

        .with_state(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
