/// Shared test fixtures
use crate::security::jwt;

pub const TEST_JWT_SECRET: &str = "test-signing-secret-0123456789abcdef";

/// Initialize the process-wide signing keys for tests. Safe to call from
/// every test; only the first call takes effect.
pub fn init_jwt() {
    jwt::initialize_keys(TEST_JWT_SECRET);
}
