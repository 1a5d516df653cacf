/// Comment repository - database operations for comments
use crate::models::{Comment, CommentWithAuthorRow};
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Create a new comment on a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, post_id, author_id, text, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, post_id, author_id, text, created_at
        "#,
    )
    .bind(id)
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// List a post's comments with their author's username, oldest first
pub async fn list_comments_for_post(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<CommentWithAuthorRow>, sqlx::Error> {
    sqlx::query_as::<_, CommentWithAuthorRow>(
        r#"
        SELECT c.id, c.post_id, c.text, c.created_at,
               u.id AS author_id, u.username AS author_username
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Delete every comment on a post; runs inside the caller's transaction.
/// Returns the number of comments removed.
pub async fn delete_comments_for_post(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}
