/// User repository - database operations for user records
use crate::models::User;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new user. Surfaces a unique violation if the username is taken.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        RETURNING id, username, password_hash, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Find a user by username. Lookups are case-sensitive.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, created_at, updated_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}
