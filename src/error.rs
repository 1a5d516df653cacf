/// Error types for the blog service
///
/// Errors are converted to JSON HTTP responses for API clients. Store and
/// unexpected failures are logged server-side and redacted to a generic
/// message before they cross the boundary.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for blog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad input shape or format
    #[error("Validation error: {0}")]
    Validation(String),

    /// Login with an unknown username or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No credentials were presented on a protected route
    #[error("Missing credentials")]
    MissingCredentials,

    /// A token was presented but failed verification
    #[error("Invalid token")]
    InvalidToken,

    /// Authenticated but not permitted. Also covers a resource that is
    /// absent, see DESIGN.md.
    #[error("Not authorized")]
    NotAuthorized,

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Store operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short, actionable message safe to return to clients.
    fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::MissingCredentials => "Authentication required".to_string(),
            AppError::InvalidToken => "Invalid or expired token".to_string(),
            AppError::NotAuthorized => "Not authorized".to_string(),
            AppError::NotFound(what) => format!("{} not found", what),
            // Internal details never cross the boundary.
            AppError::Database(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::MissingCredentials
            | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::NotAuthorized => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self);
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.client_message(),
            "status": status.as_u16(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

/// True when the error is a unique-constraint violation from the store.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation))
}

/// True when the error is a foreign-key violation from the store.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::MissingCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotAuthorized.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::NotFound("post".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_are_redacted() {
        let err = AppError::Database("connection to db.internal:5432 refused".into());
        let msg = err.client_message();
        assert_eq!(msg, "Internal server error");
        assert!(!msg.contains("db.internal"));

        let err = AppError::Internal("stack trace here".into());
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn client_errors_keep_their_message() {
        let err = AppError::Validation("Invalid post ID".into());
        assert_eq!(err.client_message(), "Invalid post ID");

        let err = AppError::NotFound("post".into());
        assert_eq!(err.client_message(), "post not found");
    }
}
