/// Comment service - comment creation and retrieval
use crate::db::{comment_repo, post_repo};
use crate::error::{self, AppError, Result};
use crate::models::{Comment, CommentResponse};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment on an existing post. A missing post is a 404, not an
    /// authorization failure.
    pub async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Comment> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound("post".to_string()));
        }

        match comment_repo::create_comment(&self.pool, post_id, author_id, text).await {
            Ok(comment) => {
                tracing::info!(comment_id = %comment.id, post_id = %post_id, "comment created");
                Ok(comment)
            }
            // The post can vanish between the existence check and the insert.
            Err(err) if error::is_foreign_key_violation(&err) => {
                Err(AppError::NotFound("post".to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// List a post's comments with authors populated
    pub async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentResponse>> {
        let rows = comment_repo::list_comments_for_post(&self.pool, post_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
