use sqlx::SqlitePool;
use uuid::Uuid;

use super::{now, Message, MessageRow};

const MESSAGE_ROWS: &str = "SELECT m.id, m.body, m.created, m.user_id, u.username, u.avatar,
        m.room_id, r.name AS room_name
    FROM messages m
    JOIN users u ON u.id = m.user_id
    JOIN rooms r ON r.id = m.room_id
    JOIN topics t ON t.id = r.topic_id";

const TOPIC_MATCHES: &str = "(? = '' OR instr(lower(t.name), lower(?)) > 0)";

pub async fn create(db_pool: &SqlitePool, user_id: Uuid, room_id: Uuid, body: &str) -> Result<Message, sqlx::Error> {
    let created = now();
    let message = Message {
        id: Uuid::now_v7(),
        user_id,
        room_id,
        body: body.to_owned(),
        created,
        updated: created,
    };

    sqlx::query("INSERT INTO messages (id,user_id,room_id,body,created,updated) VALUES (?,?,?,?,?,?)")
        .bind(message.id)
        .bind(message.user_id)
        .bind(message.room_id)
        .bind(&message.body)
        .bind(message.created)
        .bind(message.updated)
        .execute(db_pool)
        .await?;

    Ok(message)
}

pub async fn find(db_pool: &SqlitePool, id: Uuid) -> Result<Option<Message>, sqlx::Error> {
    sqlx::query_as("SELECT id, user_id, room_id, body, created, updated FROM messages WHERE id=?")
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

pub async fn delete(db_pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM messages WHERE id=?")
        .bind(id)
        .execute(db_pool)
        .await?;
    Ok(())
}

/// A room's conversation, oldest first.
pub async fn in_room(db_pool: &SqlitePool, room_id: Uuid) -> Result<Vec<MessageRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{MESSAGE_ROWS} WHERE m.room_id = ? ORDER BY m.created, m.id"
    ))
    .bind(room_id)
    .fetch_all(db_pool)
    .await
}

/// Messages in rooms whose topic name contains `q`, newest first.
pub async fn recent(db_pool: &SqlitePool, q: &str) -> Result<Vec<MessageRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{MESSAGE_ROWS} WHERE {TOPIC_MATCHES} ORDER BY m.created DESC, m.id DESC"
    ))
    .bind(q)
    .bind(q)
    .fetch_all(db_pool)
    .await
}

pub async fn by_user(db_pool: &SqlitePool, user_id: Uuid, q: &str) -> Result<Vec<MessageRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{MESSAGE_ROWS} WHERE m.user_id = ? AND {TOPIC_MATCHES} ORDER BY m.created DESC, m.id DESC"
    ))
    .bind(user_id)
    .bind(q)
    .bind(q)
    .fetch_all(db_pool)
    .await
}

pub async fn all(db_pool: &SqlitePool) -> Result<Vec<MessageRow>, sqlx::Error> {
    recent(db_pool, "").await
}
