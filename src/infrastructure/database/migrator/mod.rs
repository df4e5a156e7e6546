//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_admins;
mod m20240101_000002_create_offices;
mod m20240101_000003_create_accounts;
mod m20240101_000004_create_themes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_admins::Migration),
            Box::new(m20240101_000002_create_offices::Migration),
            Box::new(m20240101_000003_create_accounts::Migration),
            Box::new(m20240101_000004_create_themes::Migration),
        ]
    }
}
