//! Storage layer: entity rows and the queries the handlers need.
//!
//! All ids are UUIDv7 stored as blobs; timestamps are UTC with whole-second
//! precision, so ordering by `(created, id)` follows insertion order.

pub mod messages;
pub mod rooms;
pub mod topics;
pub mod users;

use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
    pub date_joined: OffsetDateTime,
}

/// The public face of a user, as shown next to rooms and messages.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub avatar: String,
}

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Topic {
    pub id: Uuid,
    pub name: String,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct TopicRow {
    pub id: Uuid,
    pub name: String,
    pub room_count: i64,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Room {
    pub id: Uuid,
    pub host_id: Uuid,
    pub topic_id: Uuid,
    pub name: String,
    pub description: String,
    pub created: OffsetDateTime,
    pub updated: OffsetDateTime,
}

/// A room joined with its host and topic for listing pages.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct RoomRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub host_id: Uuid,
    pub host_username: String,
    pub host_avatar: String,
    pub topic_name: String,
    pub created: OffsetDateTime,
    pub updated: OffsetDateTime,
    pub participant_count: i64,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub body: String,
    pub created: OffsetDateTime,
    pub updated: OffsetDateTime,
}

/// A message joined with its author and room for feeds.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct MessageRow {
    pub id: Uuid,
    pub body: String,
    pub created: OffsetDateTime,
    pub user_id: Uuid,
    pub username: String,
    pub avatar: String,
    pub room_id: Uuid,
    pub room_name: String,
}

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect_with(options)
        .await?;

    sqlx::migrate!().run(&db_pool).await?;
    Ok(db_pool)
}

pub(crate) fn now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now - time::Duration::nanoseconds(now.nanosecond().into())
}
