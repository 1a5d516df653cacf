/// Domain models and request/response types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// =====================================================================
// Stored records
// =====================================================================

/// User record. Identity is immutable once created; there is no update or
/// delete path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post record. `author_id` is set once at creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

// =====================================================================
// Read projections (author populated via join)
// =====================================================================

/// Author identity embedded in read responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthorRow {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: Author,
}

impl From<PostWithAuthorRow> for PostResponse {
    fn from(row: PostWithAuthorRow) -> Self {
        PostResponse {
            id: row.id,
            title: row.title,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
            author: Author {
                id: row.author_id,
                username: row.author_username,
            },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthorRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: Author,
}

impl From<CommentWithAuthorRow> for CommentResponse {
    fn from(row: CommentWithAuthorRow) -> Self {
        CommentResponse {
            id: row.id,
            post_id: row.post_id,
            text: row.text,
            created_at: row.created_at,
            author: Author {
                id: row.author_id,
                username: row.author_username,
            },
        }
    }
}

// =====================================================================
// Request payloads
// =====================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 256, message = "password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckUsernameRequest {
    pub username: String,
}

/// Body for creating and updating posts
#[derive(Debug, Deserialize, Validate)]
pub struct PostPayload {
    #[validate(length(min = 1, max = 256, message = "title must be 1-256 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 65536, message = "body must not be empty"))]
    pub body: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentPayload {
    #[validate(length(min = 1, max = 8192, message = "text must be 1-8192 characters"))]
    pub text: String,
}

// =====================================================================
// Response payloads
// =====================================================================

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CheckUsernameResponse {
    pub exists: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
