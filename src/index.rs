use askama::Template;
use axum::{debug_handler, extract::{Query, State}, response::{Html, IntoResponse, Response}};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    db::{self, MessageRow, RoomRow, TopicRow, User},
    session, AppResult,
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    pub fn filter(self) -> String {
        self.q.unwrap_or_default()
    }
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    caller: Option<User>,
    rooms: Vec<RoomRow>,
    count: usize,
    topics: Vec<TopicRow>,
    feed: Vec<MessageRow>,
}

#[debug_handler]
pub async fn home(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    let caller = session::current_user(&session, &db_pool).await?;
    let q = query.filter();

    let rooms = db::rooms::search(&db_pool, &q).await?;
    let page = HomeTemplate {
        caller,
        count: rooms.len(),
        rooms,
        topics: db::topics::all(&db_pool).await?,
        feed: db::messages::recent(&db_pool, &q).await?,
    };

    Ok(Html(page.render()?).into_response())
}

#[derive(Template)]
#[template(path = "topics.html")]
struct TopicsTemplate {
    caller: Option<User>,
    q: String,
    topics: Vec<TopicRow>,
}

#[debug_handler]
pub async fn topics_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    let caller = session::current_user(&session, &db_pool).await?;
    let q = query.filter();

    let page = TopicsTemplate {
        caller,
        topics: db::topics::search(&db_pool, &q).await?,
        q,
    };

    Ok(Html(page.render()?).into_response())
}

#[derive(Template)]
#[template(path = "activity.html")]
struct ActivityTemplate {
    caller: Option<User>,
    feed: Vec<MessageRow>,
}

#[debug_handler]
pub async fn activity_page(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Response> {
    let page = ActivityTemplate {
        caller: session::current_user(&session, &db_pool).await?,
        feed: db::messages::all(&db_pool).await?,
    };

    Ok(Html(page.render()?).into_response())
}
