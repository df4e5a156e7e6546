//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{AdminRepository, OfficeRepository, RepositoryProvider, ThemeRepository};

use super::admin_repository::SeaOrmAdminRepository;
use super::office_repository::SeaOrmOfficeRepository;
use super::theme_repository::SeaOrmThemeRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let office = repos.offices().find_by_name("강남점").await?;
/// let themes = repos.themes().find_by_office(office_id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    admins: SeaOrmAdminRepository,
    offices: SeaOrmOfficeRepository,
    themes: SeaOrmThemeRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            admins: SeaOrmAdminRepository::new(db.clone()),
            offices: SeaOrmOfficeRepository::new(db.clone()),
            themes: SeaOrmThemeRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn admins(&self) -> &dyn AdminRepository {
        &self.admins
    }

    fn offices(&self) -> &dyn OfficeRepository {
        &self.offices
    }

    fn themes(&self) -> &dyn ThemeRepository {
        &self.themes
    }
}
