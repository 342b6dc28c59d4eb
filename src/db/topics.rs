use sqlx::SqlitePool;
use uuid::Uuid;

use super::{Topic, TopicRow};

/// Topics whose name contains `q` (ASCII case-insensitive), with room counts.
pub async fn search(db_pool: &SqlitePool, q: &str) -> Result<Vec<TopicRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT t.id, t.name, (SELECT COUNT(*) FROM rooms r WHERE r.topic_id = t.id) AS room_count
        FROM topics t
        WHERE ? = '' OR instr(lower(t.name), lower(?)) > 0
        ORDER BY t.name",
    )
    .bind(q)
    .bind(q)
    .fetch_all(db_pool)
    .await
}

pub async fn all(db_pool: &SqlitePool) -> Result<Vec<TopicRow>, sqlx::Error> {
    search(db_pool, "").await
}

pub async fn find(db_pool: &SqlitePool, id: Uuid) -> Result<Option<Topic>, sqlx::Error> {
    sqlx::query_as("SELECT id, name FROM topics WHERE id=?")
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

/// Resolves a topic by exact name, creating it if needed.
///
/// The insert is a no-op when the name already exists, so concurrent callers
/// converge on the same row.
pub async fn get_or_create(db_pool: &SqlitePool, name: &str) -> Result<Topic, sqlx::Error> {
    sqlx::query("INSERT INTO topics (id,name) VALUES (?,?) ON CONFLICT(name) DO NOTHING")
        .bind(Uuid::now_v7())
        .bind(name)
        .execute(db_pool)
        .await?;

    sqlx::query_as("SELECT id, name FROM topics WHERE name=?")
        .bind(name)
        .fetch_one(db_pool)
        .await
}
