//! Office repository interface

use async_trait::async_trait;

use super::model::{Office, OfficeId};
use crate::shared::types::StoreResult;

#[async_trait]
pub trait OfficeRepository: Send + Sync {
    /// Persists the office together with its whole account set.
    /// `name` must be unique across offices.
    async fn save(&self, office: Office) -> StoreResult<Office>;
    async fn find_by_id(&self, id: OfficeId) -> StoreResult<Option<Office>>;
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Office>>;
    async fn exists_by_id(&self, id: OfficeId) -> StoreResult<bool>;
    async fn find_all(&self) -> StoreResult<Vec<Office>>;
    async fn count(&self) -> StoreResult<u64>;
    /// Fails with `InvalidReference` while a theme still points at the office.
    async fn delete_by_id(&self, id: OfficeId) -> StoreResult<()>;
}
