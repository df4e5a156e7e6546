//! Admin repository interface

use async_trait::async_trait;

use super::model::{Admin, AdminId};
use crate::shared::types::StoreResult;

#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Insert when the admin has no id yet, otherwise update the stored row.
    /// `login_id` must be unique across admins.
    async fn save(&self, admin: Admin) -> StoreResult<Admin>;
    async fn find_by_id(&self, id: AdminId) -> StoreResult<Option<Admin>>;
    async fn find_by_login_id(&self, login_id: &str) -> StoreResult<Option<Admin>>;
    async fn exists_by_id(&self, id: AdminId) -> StoreResult<bool>;
    async fn find_all(&self) -> StoreResult<Vec<Admin>>;
    async fn count(&self) -> StoreResult<u64>;
    async fn delete_by_id(&self, id: AdminId) -> StoreResult<()>;
}
