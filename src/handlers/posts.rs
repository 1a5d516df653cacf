/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::handlers::parse_id;
use crate::middleware::UserId;
use crate::models::{MessageResponse, PostPayload};
use crate::services::PostService;
use crate::AppState;

/// Create a new post authored by the authenticated user
pub async fn create_post(
    state: web::Data<AppState>,
    user: UserId,
    payload: web::Json<PostPayload>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = PostService::new(state.db.clone());
    let post = service
        .create_post(user.0, &payload.title, &payload.body)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// List all posts with their authors
pub async fn list_posts(state: web::Data<AppState>) -> Result<HttpResponse> {
    let service = PostService::new(state.db.clone());
    let posts = service.list_posts().await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// List the authenticated user's posts
pub async fn list_user_posts(state: web::Data<AppState>, user: UserId) -> Result<HttpResponse> {
    let service = PostService::new(state.db.clone());
    let posts = service.list_posts_by_author(user.0).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Fetch a single post by ID
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "post")?;

    let service = PostService::new(state.db.clone());
    let post = service.get_post(post_id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Update a post; only its author may do this
pub async fn update_post(
    state: web::Data<AppState>,
    user: UserId,
    path: web::Path<String>,
    payload: web::Json<PostPayload>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "post")?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = PostService::new(state.db.clone());
    let post = service
        .update_post(post_id, user.0, &payload.title, &payload.body)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post and its comments; only its author may do this
pub async fn delete_post(
    state: web::Data<AppState>,
    user: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "post")?;

    let service = PostService::new(state.db.clone());
    service.delete_post(post_id, user.0).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Post and associated comments deleted".to_string(),
    }))
}
