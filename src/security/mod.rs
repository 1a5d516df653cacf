/// Security module: password hashing and session token management
pub mod jwt;
pub mod password;

pub use jwt::{initialize_keys, issue_token, validate_token, Claims, TokenError};
pub use password::{hash_password, verify_password};
