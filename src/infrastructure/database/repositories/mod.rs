//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod admin_repository;
mod errors;
pub mod office_repository;
pub mod repository_provider;
pub mod theme_repository;

pub use admin_repository::SeaOrmAdminRepository;
pub use office_repository::SeaOrmOfficeRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use theme_repository::SeaOrmThemeRepository;

/// Fresh in-memory database with the schema applied.
#[cfg(test)]
pub(crate) async fn test_database() -> sea_orm::DatabaseConnection {
    use sea_orm_migration::MigratorTrait;

    use super::{init_database, migrator::Migrator, DatabaseConfig};

    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}
