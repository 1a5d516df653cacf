/// Comment handlers - HTTP endpoints for comment operations
use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::handlers::parse_id;
use crate::middleware::UserId;
use crate::models::CommentPayload;
use crate::services::CommentService;
use crate::AppState;

/// Comment on a post as the authenticated user
pub async fn create_comment(
    state: web::Data<AppState>,
    user: UserId,
    path: web::Path<String>,
    payload: web::Json<CommentPayload>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "post")?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = CommentService::new(state.db.clone());
    let comment = service.create_comment(post_id, user.0, &payload.text).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// List a post's comments with their authors
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "post")?;

    let service = CommentService::new(state.db.clone());
    let comments = service.list_comments(post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}
