//! Theme repository interface

use async_trait::async_trait;

use super::model::{Theme, ThemeId};
use crate::domain::office::OfficeId;
use crate::shared::types::StoreResult;

#[async_trait]
pub trait ThemeRepository: Send + Sync {
    /// Fails with `InvalidReference` unless the theme's office is stored.
    /// `name` must be unique across themes.
    async fn save(&self, theme: Theme) -> StoreResult<Theme>;
    async fn find_by_id(&self, id: ThemeId) -> StoreResult<Option<Theme>>;
    async fn find_by_office(&self, office_id: OfficeId) -> StoreResult<Vec<Theme>>;
    async fn exists_by_id(&self, id: ThemeId) -> StoreResult<bool>;
    async fn find_all(&self) -> StoreResult<Vec<Theme>>;
    async fn count(&self) -> StoreResult<u64>;
    async fn delete_by_id(&self, id: ThemeId) -> StoreResult<()>;
}
