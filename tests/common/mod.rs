#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use roommeet::{AppState, Config};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse";

pub struct TestApp {
    router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub fn new(pool: SqlitePool) -> TestApp {
        let router = roommeet::app(AppState { db_pool: pool.clone() }, &Config::default());
        TestApp { router, pool }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::from(form.to_owned())).unwrap())
            .await
            .unwrap()
    }

    /// Signs up `username` and returns the session cookie.
    pub async fn register(&self, username: &str) -> String {
        let form = format!("username={username}&password1={PASSWORD}&password2={PASSWORD}");
        let response = self.post("/register/", &form, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        session_cookie(&response)
    }

    pub async fn user_id(&self, username: &str) -> uuid::Uuid {
        roommeet::db::users::find_by_username(&self.pool, username)
            .await
            .unwrap()
            .unwrap()
            .id
    }

    /// Creates a room through the form and returns its id.
    pub async fn create_room(&self, cookie: &str, topic: &str, name: &str) -> uuid::Uuid {
        let form = format!("topic={topic}&name={name}&description=");
        let response = self.post("/create-room/", &form, Some(cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");

        roommeet::db::rooms::search(&self.pool, name)
            .await
            .unwrap()
            .into_iter()
            .find(|room| room.name == name)
            .unwrap()
            .id
    }
}

pub fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_owned()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should redirect")
        .to_str()
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
