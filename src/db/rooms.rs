use sqlx::SqlitePool;
use uuid::Uuid;

use super::{now, Room, RoomRow, UserSummary};

const ROOM_ROWS: &str = "SELECT r.id, r.name, r.description, r.host_id,
        u.username AS host_username, u.avatar AS host_avatar, t.name AS topic_name,
        r.created, r.updated,
        (SELECT COUNT(*) FROM room_participants p WHERE p.room_id = r.id) AS participant_count
    FROM rooms r
    JOIN users u ON u.id = r.host_id
    JOIN topics t ON t.id = r.topic_id";

const NEWEST_FIRST: &str = "ORDER BY r.updated DESC, r.created DESC, r.id DESC";

/// Rooms whose topic name, name or description contains `q`.
pub async fn search(db_pool: &SqlitePool, q: &str) -> Result<Vec<RoomRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{ROOM_ROWS}
        WHERE ? = ''
            OR instr(lower(t.name), lower(?)) > 0
            OR instr(lower(r.name), lower(?)) > 0
            OR instr(lower(r.description), lower(?)) > 0
        {NEWEST_FIRST}"
    ))
    .bind(q)
    .bind(q)
    .bind(q)
    .bind(q)
    .fetch_all(db_pool)
    .await
}

/// Rooms hosted by `host_id` whose topic name contains `q`.
pub async fn hosted_by(db_pool: &SqlitePool, host_id: Uuid, q: &str) -> Result<Vec<RoomRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{ROOM_ROWS}
        WHERE r.host_id = ? AND (? = '' OR instr(lower(t.name), lower(?)) > 0)
        {NEWEST_FIRST}"
    ))
    .bind(host_id)
    .bind(q)
    .bind(q)
    .fetch_all(db_pool)
    .await
}

pub async fn find(db_pool: &SqlitePool, id: Uuid) -> Result<Option<Room>, sqlx::Error> {
    sqlx::query_as("SELECT id, host_id, topic_id, name, description, created, updated FROM rooms WHERE id=?")
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

pub async fn find_row(db_pool: &SqlitePool, id: Uuid) -> Result<Option<RoomRow>, sqlx::Error> {
    sqlx::query_as(&format!("{ROOM_ROWS} WHERE r.id = ?"))
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

pub async fn create(
    db_pool: &SqlitePool,
    host_id: Uuid,
    topic_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Room, sqlx::Error> {
    let created = now();
    let room = Room {
        id: Uuid::now_v7(),
        host_id,
        topic_id,
        name: name.to_owned(),
        description: description.to_owned(),
        created,
        updated: created,
    };

    sqlx::query("INSERT INTO rooms (id,host_id,topic_id,name,description,created,updated) VALUES (?,?,?,?,?,?,?)")
        .bind(room.id)
        .bind(room.host_id)
        .bind(room.topic_id)
        .bind(&room.name)
        .bind(&room.description)
        .bind(room.created)
        .bind(room.updated)
        .execute(db_pool)
        .await?;

    Ok(room)
}

/// Overwrites the editable fields. Concurrent edits are last-write-wins.
pub async fn update(
    db_pool: &SqlitePool,
    id: Uuid,
    topic_id: Uuid,
    name: &str,
    description: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE rooms SET topic_id=?, name=?, description=?, updated=? WHERE id=?")
        .bind(topic_id)
        .bind(name)
        .bind(description)
        .bind(now())
        .bind(id)
        .execute(db_pool)
        .await?;
    Ok(())
}

/// Deletes the room together with its messages and participant rows.
pub async fn delete(db_pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    let mut tx = db_pool.begin().await?;

    sqlx::query("DELETE FROM messages WHERE room_id=?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM room_participants WHERE room_id=?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM rooms WHERE id=?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await
}

pub async fn participants(db_pool: &SqlitePool, room_id: Uuid) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as(
        "SELECT u.id, u.username, u.avatar
        FROM room_participants p
        JOIN users u ON u.id = p.user_id
        WHERE p.room_id = ?
        ORDER BY u.username",
    )
    .bind(room_id)
    .fetch_all(db_pool)
    .await
}

/// Idempotent: a user is a participant at most once.
pub async fn add_participant(db_pool: &SqlitePool, room_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO room_participants (room_id,user_id) VALUES (?,?)")
        .bind(room_id)
        .bind(user_id)
        .execute(db_pool)
        .await?;
    Ok(())
}
