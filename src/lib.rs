// Blog Service Library

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod security;
pub mod services;
pub mod telemetry;

pub use error::{AppError, Result};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
}
