/// Post service - creation, retrieval, and owner-gated mutation
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Post, PostResponse};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_post(&self, author_id: Uuid, title: &str, body: &str) -> Result<Post> {
        let post = post_repo::create_post(&self.pool, author_id, title, body).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, "post created");
        Ok(post)
    }

    pub async fn list_posts(&self) -> Result<Vec<PostResponse>> {
        let rows = post_repo::list_posts(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_posts_by_author(&self, author_id: Uuid) -> Result<Vec<PostResponse>> {
        let rows = post_repo::list_posts_by_author(&self.pool, author_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<PostResponse> {
        post_repo::find_post_with_author(&self.pool, post_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("post".to_string()))
    }

    /// Update a post's title and body. Gated on ownership: a post that is
    /// absent or owned by someone else yields the same `NotAuthorized`.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        title: &str,
        body: &str,
    ) -> Result<Post> {
        post_repo::update_post_if_author(&self.pool, post_id, author_id, title, body)
            .await?
            .ok_or(AppError::NotAuthorized)
    }

    /// Delete a post and every comment referencing it.
    ///
    /// Comments are removed first, then the post, gated on ownership. Both
    /// statements share one transaction, so a failed ownership check rolls
    /// the comment deletion back.
    pub async fn delete_post(&self, post_id: Uuid, author_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let removed = comment_repo::delete_comments_for_post(&mut tx, post_id).await?;

        if !post_repo::delete_post_if_author(&mut tx, post_id, author_id).await? {
            // Dropping the transaction rolls back the comment deletion.
            return Err(AppError::NotAuthorized);
        }

        tx.commit().await?;
        tracing::info!(post_id = %post_id, comments_removed = removed, "post deleted");
        Ok(())
    }
}
