/// Authentication handlers
use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::db::user_repo;
use crate::error::{self, AppError, Result};
use crate::models::{
    CheckUsernameRequest, CheckUsernameResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};
use crate::security::{jwt, password};
use crate::AppState;

/// Register a new user
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let password_hash = password::hash_password(&payload.password)?;

    let user = user_repo::create_user(&state.db, &payload.username, &password_hash)
        .await
        .map_err(|err| {
            if error::is_unique_violation(&err) {
                AppError::Validation("Username already taken".to_string())
            } else {
                AppError::from(err)
            }
        })?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(HttpResponse::Created().json(RegisterResponse {
        user_id: user.id,
        username: user.username,
    }))
}

/// Log in with username and password, returning a session token.
/// Unknown usernames and wrong passwords are indistinguishable to the caller.
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = user_repo::find_by_username(&state.db, &payload.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    password::verify_password(&payload.password, &user.password_hash)?;

    let token = jwt::issue_token(user.id).map_err(|err| {
        tracing::error!("token issuance failed: {err}");
        AppError::Internal("token issuance failed".to_string())
    })?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user_id: user.id,
    }))
}

/// Check whether a username is already registered
pub async fn check_username(
    state: web::Data<AppState>,
    payload: web::Json<CheckUsernameRequest>,
) -> Result<HttpResponse> {
    let exists = user_repo::find_by_username(&state.db, &payload.username)
        .await?
        .is_some();

    Ok(HttpResponse::Ok().json(CheckUsernameResponse { exists }))
}
