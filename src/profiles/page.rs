use askama::Template;
use axum::{
    debug_handler,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{
    db::{self, MessageRow, RoomRow, TopicRow, User},
    index::SearchQuery,
    parse_id, session, AppError, AppResult,
};

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate {
    caller: Option<User>,
    user: User,
    rooms: Vec<RoomRow>,
    topics: Vec<TopicRow>,
    feed: Vec<MessageRow>,
}

#[debug_handler]
pub(crate) async fn profile(
    Path(user_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    let user_id = parse_id(&user_id, "profile")?;
    let caller = session::current_user(&session, &db_pool).await?;
    let q = query.filter();

    let user = db::users::find(&db_pool, user_id)
        .await?
        .ok_or(AppError::NotFound("profile"))?;

    let page = ProfileTemplate {
        caller,
        rooms: db::rooms::hosted_by(&db_pool, user.id, &q).await?,
        topics: db::topics::all(&db_pool).await?,
        feed: db::messages::by_user(&db_pool, user.id, &q).await?,
        user,
    };

    Ok(Html(page.render()?).into_response())
}
