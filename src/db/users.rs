use sqlx::SqlitePool;
use uuid::Uuid;

use super::{now, User};

const USER_COLUMNS: &str = "id, username, password_hash, email, bio, avatar, date_joined";

pub async fn create(db_pool: &SqlitePool, username: &str, password_hash: &str) -> Result<User, sqlx::Error> {
    let user = User {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        password_hash: password_hash.to_owned(),
        email: String::new(),
        bio: String::new(),
        avatar: String::new(),
        date_joined: now(),
    };

    sqlx::query("INSERT INTO users (id,username,password_hash,date_joined) VALUES (?,?,?,?)")
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.date_joined)
        .execute(db_pool)
        .await?;

    Ok(user)
}

pub async fn find(db_pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id=?"))
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

/// Usernames compare case-insensitively (the column is `COLLATE NOCASE`).
pub async fn find_by_username(db_pool: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE username=?"))
        .bind(username)
        .fetch_optional(db_pool)
        .await
}

/// Whether `username` belongs to anyone other than `except`.
pub async fn username_taken(db_pool: &SqlitePool, username: &str, except: Option<Uuid>) -> Result<bool, sqlx::Error> {
    let owner: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE username=?")
        .bind(username)
        .fetch_optional(db_pool)
        .await?;

    Ok(match owner {
        Some((id,)) => Some(id) != except,
        None => false,
    })
}

pub struct ProfileUpdate<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub bio: &'a str,
    pub avatar: &'a str,
}

pub async fn update_profile(db_pool: &SqlitePool, id: Uuid, update: ProfileUpdate<'_>) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET username=?, email=?, bio=?, avatar=? WHERE id=?")
        .bind(update.username)
        .bind(update.email)
        .bind(update.bio)
        .bind(update.avatar)
        .bind(id)
        .execute(db_pool)
        .await?;
    Ok(())
}

/// Unique-constraint failures surface when two registrations race for a name.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|err| err.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn usernames_are_case_insensitive(pool: SqlitePool) {
        let alice = create(&pool, "Alice", "hash").await.unwrap();

        let found = find_by_username(&pool, "aLiCe").await.unwrap().unwrap();
        assert_eq!(found.id, alice.id);

        let err = create(&pool, "ALICE", "hash").await.unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[sqlx::test]
    async fn own_username_is_not_taken(pool: SqlitePool) {
        let alice = create(&pool, "alice", "hash").await.unwrap();
        let bob = create(&pool, "bob", "hash").await.unwrap();

        assert!(!username_taken(&pool, "alice", Some(alice.id)).await.unwrap());
        assert!(username_taken(&pool, "alice", Some(bob.id)).await.unwrap());
        assert!(!username_taken(&pool, "carol", None).await.unwrap());
    }

    #[sqlx::test]
    async fn update_profile_persists(pool: SqlitePool) {
        let alice = create(&pool, "alice", "hash").await.unwrap();
        update_profile(&pool, alice.id, ProfileUpdate {
            username: "alice2",
            email: "alice@example.com",
            bio: "hi",
            avatar: "https://example.com/a.png",
        })
        .await
        .unwrap();

        let alice = find(&pool, alice.id).await.unwrap().unwrap();
        assert_eq!(alice.username, "alice2");
        assert_eq!(alice.email, "alice@example.com");
        assert_eq!(alice.bio, "hi");
        assert_eq!(alice.avatar, "https://example.com/a.png");
    }
}
