/// Request authentication middleware
///
/// Protected handlers take `UserId` as an extractor argument. Extraction reads
/// the `Authorization: Bearer <token>` header, validates the token, and
/// resolves the subject claim to a user id. The internal failure reason is
/// logged; clients only ever see a generic unauthorized response.
use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;
use crate::security::jwt;

/// Authenticated user identity attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_user_id(req).map_err(Into::into))
    }
}

fn extract_user_id(req: &HttpRequest) -> Result<UserId, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::MissingCredentials)?;

    let user_id = jwt::authenticate(token).map_err(|err| {
        tracing::debug!("token rejected: {err}");
        AppError::InvalidToken
    })?;

    Ok(UserId(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures;
    use actix_web::test::TestRequest;

    #[test]
    fn test_missing_header_is_rejected() {
        let req = TestRequest::default().to_http_request();
        let err = extract_user_id(&req).unwrap_err();
        assert!(matches!(err, AppError::MissingCredentials));
    }

    #[test]
    fn test_non_bearer_scheme_is_rejected() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwdw=="))
            .to_http_request();
        let err = extract_user_id(&req).unwrap_err();
        assert!(matches!(err, AppError::MissingCredentials));
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        fixtures::init_jwt();
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
            .to_http_request();
        let err = extract_user_id(&req).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_valid_token_resolves_user() {
        fixtures::init_jwt();
        let user_id = Uuid::new_v4();
        let token = jwt::issue_token(user_id).unwrap();

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_http_request();

        let extracted = extract_user_id(&req).unwrap();
        assert_eq!(extracted, UserId(user_id));
    }
}
