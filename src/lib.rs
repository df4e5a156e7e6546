//! # Escape-room back office core
//!
//! Domain model and persistence for an escape-room business: admins who run
//! the back office, offices (branches) with their bank accounts, and the
//! themes each office offers.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Entities with their field rules, and repository traits
//! - **infrastructure**: SeaORM database and in-memory storage
//! - **shared**: Error types, audit stamps and validation helpers
//! - **config**: TOML application config
//! - **runtime**: Bootstrap used by the `escape-admin` binary

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};

pub use runtime::{init_tracing, AppRuntime, RuntimeOptions};
pub use shared::types::AppError;
