//! SeaORM implementation of ThemeRepository

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::errors::{write_err, UniqueKey};
use crate::domain::{
    OfficeId, StoreError, StoreResult, Theme, ThemeId, ThemeRepository,
};
use crate::infrastructure::database::entities::{office, theme};

pub struct SeaOrmThemeRepository {
    db: DatabaseConnection,
}

impl SeaOrmThemeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: theme::Model) -> Theme {
    Theme::restore(
        ThemeId(model.id),
        model.name,
        model.price,
        model.open_time,
        model.discount_amount,
        model.is_available,
        model.capacity,
        OfficeId(model.office_id),
    )
}

fn active_model(theme: &Theme, office_id: OfficeId) -> theme::ActiveModel {
    theme::ActiveModel {
        id: theme.id().map_or(NotSet, |id| Set(id.0)),
        name: Set(theme.name().to_string()),
        price: Set(theme.price()),
        open_time: Set(theme.open_time()),
        discount_amount: Set(theme.discount_amount()),
        is_available: Set(theme.is_available()),
        capacity: Set(theme.capacity()),
        office_id: Set(office_id.0),
    }
}

fn name_key(theme: &Theme) -> UniqueKey<'_> {
    UniqueKey {
        entity: "Theme",
        field: "name",
        value: theme.name(),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ThemeRepository for SeaOrmThemeRepository {
    async fn save(&self, theme: Theme) -> StoreResult<Theme> {
        let office_id = theme.office_id().ok_or_else(|| StoreError::InvalidReference {
            entity: "Theme",
            field: "office_id",
            target: "unsaved office".to_string(),
        })?;

        let txn = self.db.begin().await?;

        let offices = office::Entity::find_by_id(office_id.0).count(&txn).await?;
        if offices == 0 {
            return Err(StoreError::InvalidReference {
                entity: "Theme",
                field: "office_id",
                target: office_id.to_string(),
            });
        }

        let saved = match theme.id() {
            None => {
                debug!("Inserting theme: {}", theme.name());
                let model = active_model(&theme, office_id)
                    .insert(&txn)
                    .await
                    .map_err(|e| write_err(e, name_key(&theme)))?;
                theme.persisted(ThemeId(model.id))
            }
            Some(id) => {
                debug!("Updating theme: {}", id);
                let existing = theme::Entity::find_by_id(id.0).count(&txn).await?;
                if existing == 0 {
                    return Err(StoreError::NotFound {
                        entity: "Theme",
                        id: id.0,
                    });
                }
                active_model(&theme, office_id)
                    .update(&txn)
                    .await
                    .map_err(|e| write_err(e, name_key(&theme)))?;
                theme
            }
        };

        txn.commit().await?;
        info!(
            "Theme saved: {} (office {}, fee {})",
            saved.name(),
            office_id,
            saved.final_entrance_fee()
        );
        Ok(saved)
    }

    async fn find_by_id(&self, id: ThemeId) -> StoreResult<Option<Theme>> {
        let model = theme::Entity::find_by_id(id.0).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_office(&self, office_id: OfficeId) -> StoreResult<Vec<Theme>> {
        let models = theme::Entity::find()
            .filter(theme::Column::OfficeId.eq(office_id.0))
            .order_by_asc(theme::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn exists_by_id(&self, id: ThemeId) -> StoreResult<bool> {
        let count = theme::Entity::find_by_id(id.0).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn find_all(&self) -> StoreResult<Vec<Theme>> {
        let models = theme::Entity::find()
            .order_by_asc(theme::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(theme::Entity::find().count(&self.db).await?)
    }

    async fn delete_by_id(&self, id: ThemeId) -> StoreResult<()> {
        let result = theme::Entity::delete_by_id(id.0).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound {
                entity: "Theme",
                id: id.0,
            });
        }
        info!("Theme deleted: {}", id);
        Ok(())
    }
}
