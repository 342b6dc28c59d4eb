use askama::Template;
use axum::{
    debug_handler,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::db::User;

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

#[debug_handler]
pub async fn style() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        include_res!(str, "/style.css"),
    )
}

#[debug_handler]
pub async fn avatar() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        include_res!(bytes, "/avatar.svg"),
    )
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate<'a> {
    caller: Option<User>,
    what: &'a str,
}

/// 404 page for a missing room, message, profile or route.
pub fn sorry(what: &str) -> Response {
    let page = NotFoundTemplate { caller: None, what };
    match page.render() {
        Ok(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "could not render 404 page");
            (StatusCode::NOT_FOUND, format!("{what} not found")).into_response()
        }
    }
}

#[debug_handler]
pub async fn fallback() -> Response {
    sorry("page")
}
