//! SeaORM implementation of AdminRepository

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::errors::{write_err, UniqueKey};
use crate::domain::{Admin, AdminId, AdminRepository, AdminRole, StoreError, StoreResult};
use crate::infrastructure::database::entities::admin;
use crate::shared::types::AuditStamp;

pub struct SeaOrmAdminRepository {
    db: DatabaseConnection,
}

impl SeaOrmAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn role_to_entity(role: AdminRole) -> admin::AdminRole {
    match role {
        AdminRole::SuperAdmin => admin::AdminRole::SuperAdmin,
        AdminRole::OfficeManager => admin::AdminRole::OfficeManager,
        AdminRole::Staff => admin::AdminRole::Staff,
    }
}

fn entity_to_role(role: admin::AdminRole) -> AdminRole {
    match role {
        admin::AdminRole::SuperAdmin => AdminRole::SuperAdmin,
        admin::AdminRole::OfficeManager => AdminRole::OfficeManager,
        admin::AdminRole::Staff => AdminRole::Staff,
    }
}

fn model_to_domain(model: admin::Model) -> Admin {
    Admin::restore(
        AdminId(model.id),
        model.login_id,
        model.password,
        model.name,
        model.phone_number,
        entity_to_role(model.role),
        AuditStamp {
            created_at: model.created_at,
            updated_at: model.updated_at,
        },
    )
}

fn active_model(admin: &Admin, audit: AuditStamp) -> admin::ActiveModel {
    admin::ActiveModel {
        id: admin.id().map_or(NotSet, |id| Set(id.0)),
        login_id: Set(admin.login_id().to_string()),
        password: Set(admin.password().to_string()),
        name: Set(admin.name().to_string()),
        phone_number: Set(admin.phone_number().map(str::to_string)),
        role: Set(role_to_entity(admin.role())),
        created_at: Set(audit.created_at),
        updated_at: Set(audit.updated_at),
    }
}

fn login_id_key(admin: &Admin) -> UniqueKey<'_> {
    UniqueKey {
        entity: "Admin",
        field: "login_id",
        value: admin.login_id(),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn save(&self, admin: Admin) -> StoreResult<Admin> {
        match admin.id() {
            None => {
                debug!("Inserting admin: {}", admin.login_id());
                let audit = AuditStamp::now();
                let model = active_model(&admin, audit)
                    .insert(&self.db)
                    .await
                    .map_err(|e| write_err(e, login_id_key(&admin)))?;
                info!("Admin saved: {} ({})", model.login_id, model.id);
                Ok(admin.persisted(AdminId(model.id), audit))
            }
            Some(id) => {
                debug!("Updating admin: {}", id);
                let txn = self.db.begin().await?;
                let existing = admin::Entity::find_by_id(id.0)
                    .one(&txn)
                    .await?
                    .ok_or(StoreError::NotFound {
                        entity: "Admin",
                        id: id.0,
                    })?;
                let audit = AuditStamp {
                    created_at: existing.created_at,
                    updated_at: existing.updated_at,
                }
                .touched();
                active_model(&admin, audit)
                    .update(&txn)
                    .await
                    .map_err(|e| write_err(e, login_id_key(&admin)))?;
                txn.commit().await?;
                info!("Admin updated: {} ({})", admin.login_id(), id);
                Ok(admin.persisted(id, audit))
            }
        }
    }

    async fn find_by_id(&self, id: AdminId) -> StoreResult<Option<Admin>> {
        let model = admin::Entity::find_by_id(id.0).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_login_id(&self, login_id: &str) -> StoreResult<Option<Admin>> {
        let model = admin::Entity::find()
            .filter(admin::Column::LoginId.eq(login_id))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn exists_by_id(&self, id: AdminId) -> StoreResult<bool> {
        let count = admin::Entity::find_by_id(id.0).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn find_all(&self) -> StoreResult<Vec<Admin>> {
        let models = admin::Entity::find()
            .order_by_asc(admin::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(admin::Entity::find().count(&self.db).await?)
    }

    async fn delete_by_id(&self, id: AdminId) -> StoreResult<()> {
        let result = admin::Entity::delete_by_id(id.0).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound {
                entity: "Admin",
                id: id.0,
            });
        }
        info!("Admin deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewAdmin;
    use crate::infrastructure::database::repositories::test_database;

    fn new_admin(login_id: &str, phone_number: Option<&str>) -> Admin {
        Admin::new(NewAdmin {
            login_id: login_id.into(),
            password: "password123".into(),
            name: "관리자".into(),
            phone_number: phone_number.map(Into::into),
            role: AdminRole::OfficeManager,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn save_and_reload_admin() {
        let repo = SeaOrmAdminRepository::new(test_database().await);

        let saved = repo
            .save(new_admin("manager", Some("010-1234-5678")))
            .await
            .unwrap();
        let id = saved.id().unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert_eq!(found.phone_number(), Some("010-1234-5678"));
        assert_eq!(found.role(), AdminRole::OfficeManager);

        let by_login = repo.find_by_login_id("manager").await.unwrap().unwrap();
        assert_eq!(by_login.id(), Some(id));
        assert!(repo.exists_by_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn admin_without_phone_number_round_trips() {
        let repo = SeaOrmAdminRepository::new(test_database().await);
        let saved = repo.save(new_admin("nophone", None)).await.unwrap();

        let found = repo.find_by_id(saved.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.phone_number(), None);
    }

    #[tokio::test]
    async fn duplicate_login_id_is_rejected() {
        let repo = SeaOrmAdminRepository::new(test_database().await);
        repo.save(new_admin("same", None)).await.unwrap();

        let err = repo.save(new_admin("same", None)).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Duplicate { entity: "Admin", field: "login_id", .. }
        ));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_keeps_creation_instant() {
        let repo = SeaOrmAdminRepository::new(test_database().await);
        let mut admin = repo.save(new_admin("manager", None)).await.unwrap();
        let created_at = admin.audit().unwrap().created_at;

        admin.change_role(AdminRole::Staff).unwrap();
        admin.change_phone_number("010-9999-0000").unwrap();
        let updated = repo.save(admin).await.unwrap();

        let found = repo.find_by_id(updated.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.role(), AdminRole::Staff);
        assert_eq!(found.phone_number(), Some("010-9999-0000"));
        assert_eq!(found.audit().unwrap().created_at, created_at);
        assert!(found.audit().unwrap().updated_at >= created_at);
    }

    #[tokio::test]
    async fn saving_unknown_id_is_not_found() {
        let repo = SeaOrmAdminRepository::new(test_database().await);
        let mut saved = repo.save(new_admin("ghost", None)).await.unwrap();
        repo.delete_by_id(saved.id().unwrap()).await.unwrap();

        saved.change_name("유령").unwrap();
        let err = repo.save(saved).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Admin", .. }));

        // the abandoned update transaction must not hold the only connection
        assert_eq!(repo.count().await.unwrap(), 0);
        repo.save(new_admin("ghost", None)).await.unwrap();
    }

    #[tokio::test]
    async fn find_all_orders_by_id_and_delete_removes() {
        let repo = SeaOrmAdminRepository::new(test_database().await);
        let first = repo.save(new_admin("first", None)).await.unwrap();
        let second = repo.save(new_admin("second", None)).await.unwrap();

        let all = repo.find_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);

        repo.delete_by_id(first.id().unwrap()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.find_by_login_id("first").await.unwrap().is_none());

        let err = repo.delete_by_id(first.id().unwrap()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Admin", .. }));
    }
}
