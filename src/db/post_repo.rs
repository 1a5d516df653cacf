/// Post repository - database operations for posts
use crate::models::{Post, PostWithAuthorRow};
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    title: &str,
    body: &str,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, title, body, author_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, title, body, author_id, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(body)
    .bind(author_id)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// List all posts with their author's username, newest first
pub async fn list_posts(pool: &PgPool) -> Result<Vec<PostWithAuthorRow>, sqlx::Error> {
    sqlx::query_as::<_, PostWithAuthorRow>(
        r#"
        SELECT p.id, p.title, p.body, p.created_at, p.updated_at,
               u.id AS author_id, u.username AS author_username
        FROM posts p
        JOIN users u ON u.id = p.author_id
        ORDER BY p.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// List a single author's posts, newest first
pub async fn list_posts_by_author(
    pool: &PgPool,
    author_id: Uuid,
) -> Result<Vec<PostWithAuthorRow>, sqlx::Error> {
    sqlx::query_as::<_, PostWithAuthorRow>(
        r#"
        SELECT p.id, p.title, p.body, p.created_at, p.updated_at,
               u.id AS author_id, u.username AS author_username
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.author_id = $1
        ORDER BY p.created_at DESC
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await
}

/// Find a post by ID with its author's username
pub async fn find_post_with_author(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Option<PostWithAuthorRow>, sqlx::Error> {
    sqlx::query_as::<_, PostWithAuthorRow>(
        r#"
        SELECT p.id, p.title, p.body, p.created_at, p.updated_at,
               u.id AS author_id, u.username AS author_username
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// True when the post exists
pub async fn post_exists(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(exists.0)
}

/// Update a post's title and body, gated on authorship.
/// Returns `None` when the post is absent or owned by someone else.
pub async fn update_post_if_author(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    title: &str,
    body: &str,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = $1, body = $2, updated_at = $3
        WHERE id = $4 AND author_id = $5
        RETURNING id, title, body, author_id, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(body)
    .bind(Utc::now())
    .bind(post_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await
}

/// Delete a post, gated on authorship; runs inside the caller's transaction.
/// Returns whether a row was deleted.
pub async fn delete_post_if_author(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND author_id = $2")
        .bind(post_id)
        .bind(author_id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected() > 0)
}
