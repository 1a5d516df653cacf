/// Session token issuing and validation using HS256 JWTs
///
/// The signing secret is process-wide configuration: `initialize_keys` must
/// run once at startup before any token operation. Tokens are not persisted
/// anywhere; validity is determined purely by signature and expiry.
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const TOKEN_EXPIRY_HOURS: i64 = 1;
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Decode target with every claim optional. `decode` deserializes into the
/// claims struct before the required-claim validation runs, so a required
/// field here would surface a missing claim as an opaque JSON error instead
/// of `MissingClaim`.
#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    iat: i64,
    #[serde(default)]
    exp: Option<i64>,
}

/// Token verification failures, distinguishable for logging.
/// All of them collapse to a generic unauthorized response at the boundary.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("signature mismatch")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("missing required claim: {0}")]
    MissingClaim(String),
    #[error("token encoding failed")]
    Encoding,
    #[error("signing keys not initialized")]
    KeysNotInitialized,
}

static JWT_ENCODING_KEY: OnceCell<EncodingKey> = OnceCell::new();
static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

/// Derive the signing keys from the shared secret.
/// Must run during startup before any token operation; later calls are no-ops.
pub fn initialize_keys(secret: &str) {
    let _ = JWT_ENCODING_KEY.set(EncodingKey::from_secret(secret.as_bytes()));
    let _ = JWT_DECODING_KEY.set(DecodingKey::from_secret(secret.as_bytes()));
}

fn encoding_key() -> Result<&'static EncodingKey, TokenError> {
    JWT_ENCODING_KEY.get().ok_or(TokenError::KeysNotInitialized)
}

fn decoding_key() -> Result<&'static DecodingKey, TokenError> {
    JWT_DECODING_KEY.get().ok_or(TokenError::KeysNotInitialized)
}

/// Issue a signed session token for a user, valid for one hour.
pub fn issue_token(user_id: Uuid) -> Result<String, TokenError> {
    issue_token_with_ttl(user_id, Duration::hours(TOKEN_EXPIRY_HOURS))
}

fn issue_token_with_ttl(user_id: Uuid, ttl: Duration) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key()?)
        .map_err(|_| TokenError::Encoding)
}

/// Validate a token's signature and expiry, returning the decoded claims.
pub fn validate_token(token: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<RawClaims>(token, decoding_key()?, &validation).map_err(|err| {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim(claim.clone()),
            _ => TokenError::Malformed,
        }
    })?;

    let raw = data.claims;
    Ok(Claims {
        sub: raw
            .sub
            .ok_or_else(|| TokenError::MissingClaim("sub".to_string()))?,
        iat: raw.iat,
        exp: raw
            .exp
            .ok_or_else(|| TokenError::MissingClaim("exp".to_string()))?,
    })
}

/// Validate a token and resolve its subject claim to a user id.
pub fn authenticate(token: &str) -> Result<Uuid, TokenError> {
    let claims = validate_token(token)?;
    Uuid::parse_str(&claims.sub).map_err(|_| TokenError::MissingClaim("sub".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures;

    #[test]
    fn test_issued_token_is_valid() {
        fixtures::init_jwt();
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id).unwrap();
        let resolved = authenticate(&token).unwrap();

        assert_eq!(resolved, user_id);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        fixtures::init_jwt();
        let user_id = Uuid::new_v4();

        let token = issue_token_with_ttl(user_id, Duration::seconds(-5)).unwrap();
        let err = validate_token(&token).unwrap_err();

        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        fixtures::init_jwt();
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id).unwrap();
        let mut chars: Vec<char> = token.chars().collect();
        let last = *chars.last().unwrap();
        *chars.last_mut().unwrap() = if last == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        let err = validate_token(&tampered).unwrap_err();
        assert!(matches!(
            err,
            TokenError::InvalidSignature | TokenError::Malformed
        ));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        fixtures::init_jwt();
        let err = validate_token("not-a-token").unwrap_err();
        assert!(matches!(err, TokenError::Malformed));
    }

    #[test]
    fn test_token_without_subject_is_rejected() {
        fixtures::init_jwt();
        let now = Utc::now().timestamp();
        let claims = serde_json::json!({ "iat": now, "exp": now + 3600 });

        let token = encode(
            &Header::new(JWT_ALGORITHM),
            &claims,
            encoding_key().unwrap(),
        )
        .unwrap();

        let err = validate_token(&token).unwrap_err();
        assert!(matches!(err, TokenError::MissingClaim(ref claim) if claim == "sub"));
    }

    #[test]
    fn test_token_without_expiry_is_rejected() {
        fixtures::init_jwt();
        let now = Utc::now().timestamp();
        let claims = serde_json::json!({ "sub": Uuid::new_v4(), "iat": now });

        let token = encode(
            &Header::new(JWT_ALGORITHM),
            &claims,
            encoding_key().unwrap(),
        )
        .unwrap();

        let err = validate_token(&token).unwrap_err();
        assert!(matches!(err, TokenError::MissingClaim(ref claim) if claim == "exp"));
    }

    #[test]
    fn test_subject_must_be_a_uuid() {
        fixtures::init_jwt();
        let now = Utc::now();
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        let token = encode(
            &Header::new(JWT_ALGORITHM),
            &claims,
            encoding_key().unwrap(),
        )
        .unwrap();

        let err = authenticate(&token).unwrap_err();
        assert!(matches!(err, TokenError::MissingClaim(_)));
    }
}
