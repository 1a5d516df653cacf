/// HTTP handlers
pub mod auth;
pub mod comments;
pub mod posts;

pub use auth::{check_username, login, register};
pub use comments::{create_comment, list_comments};
pub use posts::{create_post, delete_post, get_post, list_posts, list_user_posts, update_post};

use crate::error::{AppError, Result};
use uuid::Uuid;

/// Parse a path identifier before any store round-trip. Malformed ids fail
/// fast with a 400, distinct from "not found".
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("Invalid {what} ID")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "post").unwrap(), id);
    }

    #[test]
    fn test_parse_id_rejects_malformed() {
        let err = parse_id("123-not-a-uuid", "post").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = parse_id("", "comment").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
