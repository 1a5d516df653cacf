/// Configuration management for the blog service
///
/// All configuration comes from environment variables. Development defaults
/// are provided for everything except the token signing secret, which has no
/// fallback.

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for signing session tokens
    pub jwt_secret: String,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or "*"
    pub allowed_origins: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig {
                host: std::env::var("BLOG_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("BLOG_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/blog".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            auth: AuthConfig {
                // No fallback for the signing secret.
                jwt_secret: std::env::var("JWT_SECRET")
                    .map_err(|_| "JWT_SECRET must be set".to_string())?,
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            },
        })
    }
}
