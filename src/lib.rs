//! Mercado Fresh: warehouse management REST backend on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ConfigError, Settings};
pub use error::AppError;
pub use migration::apply_migrations;
pub use routes::app;
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
