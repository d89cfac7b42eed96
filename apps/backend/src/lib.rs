#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod entities;
pub mod error;
pub mod errors;
pub mod health;
pub mod infra;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use config::db::db_url;
pub use error::AppError;
pub use errors::ErrorCode;
pub use infra::db::connect_db;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
