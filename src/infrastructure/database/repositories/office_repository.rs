//! SeaORM implementation of OfficeRepository
//!
//! An office row and its account rows are written in one transaction; saving
//! replaces the stored account set with the office's current one.

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::errors::{write_err, UniqueKey};
use crate::domain::{Account, Office, OfficeId, OfficeRepository, StoreError, StoreResult};
use crate::infrastructure::database::entities::{account, office, theme};
use crate::shared::types::AuditStamp;

pub struct SeaOrmOfficeRepository {
    db: DatabaseConnection,
}

impl SeaOrmOfficeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: office::Model, accounts: Vec<account::Model>) -> Office {
    Office::restore(
        OfficeId(model.id),
        model.name,
        accounts
            .into_iter()
            .map(|a| Account::of(a.bank_name, a.account_number)),
        model.welcome_message,
        AuditStamp {
            created_at: model.created_at,
            updated_at: model.updated_at,
        },
    )
}

fn active_model(office: &Office, audit: AuditStamp) -> office::ActiveModel {
    office::ActiveModel {
        id: office.id().map_or(NotSet, |id| Set(id.0)),
        name: Set(office.name().to_string()),
        welcome_message: Set(office.welcome_message().map(str::to_string)),
        created_at: Set(audit.created_at),
        updated_at: Set(audit.updated_at),
    }
}

fn name_key(office: &Office) -> UniqueKey<'_> {
    UniqueKey {
        entity: "Office",
        field: "name",
        value: office.name(),
    }
}

async fn replace_accounts<C: ConnectionTrait>(
    conn: &C,
    office_id: i32,
    office: &Office,
) -> StoreResult<()> {
    account::Entity::delete_many()
        .filter(account::Column::OfficeId.eq(office_id))
        .exec(conn)
        .await?;

    let rows: Vec<account::ActiveModel> = office
        .accounts()
        .iter()
        .map(|a| account::ActiveModel {
            office_id: Set(office_id),
            bank_name: Set(a.bank_name().to_string()),
            account_number: Set(a.account_number().to_string()),
        })
        .collect();
    if !rows.is_empty() {
        account::Entity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }
    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl OfficeRepository for SeaOrmOfficeRepository {
    async fn save(&self, office: Office) -> StoreResult<Office> {
        let txn = self.db.begin().await?;

        let (id, audit) = match office.id() {
            None => {
                debug!("Inserting office: {}", office.name());
                let audit = AuditStamp::now();
                let model = active_model(&office, audit)
                    .insert(&txn)
                    .await
                    .map_err(|e| write_err(e, name_key(&office)))?;
                (OfficeId(model.id), audit)
            }
            Some(id) => {
                debug!("Updating office: {}", id);
                let existing = office::Entity::find_by_id(id.0)
                    .one(&txn)
                    .await?
                    .ok_or(StoreError::NotFound {
                        entity: "Office",
                        id: id.0,
                    })?;
                let audit = AuditStamp {
                    created_at: existing.created_at,
                    updated_at: existing.updated_at,
                }
                .touched();
                active_model(&office, audit)
                    .update(&txn)
                    .await
                    .map_err(|e| write_err(e, name_key(&office)))?;
                (id, audit)
            }
        };

        replace_accounts(&txn, id.0, &office).await?;
        txn.commit().await?;

        info!(
            "Office saved: {} ({}) with {} account(s)",
            office.name(),
            id,
            office.accounts().len()
        );
        Ok(office.persisted(id, audit))
    }

    async fn find_by_id(&self, id: OfficeId) -> StoreResult<Option<Office>> {
        let Some(model) = office::Entity::find_by_id(id.0).one(&self.db).await? else {
            return Ok(None);
        };
        let accounts = model.find_related(account::Entity).all(&self.db).await?;
        Ok(Some(model_to_domain(model, accounts)))
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Office>> {
        let Some(model) = office::Entity::find()
            .filter(office::Column::Name.eq(name))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let accounts = model.find_related(account::Entity).all(&self.db).await?;
        Ok(Some(model_to_domain(model, accounts)))
    }

    async fn exists_by_id(&self, id: OfficeId) -> StoreResult<bool> {
        let count = office::Entity::find_by_id(id.0).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn find_all(&self) -> StoreResult<Vec<Office>> {
        let rows = office::Entity::find()
            .order_by_asc(office::Column::Id)
            .find_with_related(account::Entity)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(model, accounts)| model_to_domain(model, accounts))
            .collect())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(office::Entity::find().count(&self.db).await?)
    }

    async fn delete_by_id(&self, id: OfficeId) -> StoreResult<()> {
        let txn = self.db.begin().await?;

        let themes = theme::Entity::find()
            .filter(theme::Column::OfficeId.eq(id.0))
            .count(&txn)
            .await?;
        if themes > 0 {
            return Err(StoreError::InvalidReference {
                entity: "Theme",
                field: "office_id",
                target: id.to_string(),
            });
        }

        account::Entity::delete_many()
            .filter(account::Column::OfficeId.eq(id.0))
            .exec(&txn)
            .await?;
        let result = office::Entity::delete_by_id(id.0).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound {
                entity: "Office",
                id: id.0,
            });
        }

        txn.commit().await?;
        info!("Office deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::domain::{NewOffice, NewTheme, Theme, ThemeRepository};
    use crate::infrastructure::database::repositories::{test_database, SeaOrmThemeRepository};

    fn new_office(name: &str) -> Office {
        Office::new(NewOffice {
            name: name.into(),
            accounts: vec![
                Account::of("국민은행", "123-456-789"),
                Account::of("신한은행", "987-654-321"),
            ],
            welcome_message: Some("어서 오세요".into()),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn save_and_reload_office_with_accounts() {
        let repo = SeaOrmOfficeRepository::new(test_database().await);

        let saved = repo.save(new_office("강남점")).await.unwrap();
        let found = repo.find_by_id(saved.id().unwrap()).await.unwrap().unwrap();

        assert_eq!(found, saved);
        assert_eq!(found.accounts().len(), 2);
        assert!(found.has_account(&Account::of("국민은행", "123-456-789")));
        assert_eq!(found.welcome_message(), Some("어서 오세요"));

        let by_name = repo.find_by_name("강남점").await.unwrap().unwrap();
        assert_eq!(by_name.id(), saved.id());
    }

    #[tokio::test]
    async fn office_without_accounts_round_trips() {
        let repo = SeaOrmOfficeRepository::new(test_database().await);
        let office = Office::new(NewOffice {
            name: "홍대점".into(),
            ..NewOffice::default()
        })
        .unwrap();

        let saved = repo.save(office).await.unwrap();
        let found = repo.find_by_id(saved.id().unwrap()).await.unwrap().unwrap();
        assert!(found.accounts().is_empty());
        assert_eq!(found.welcome_message(), None);
    }

    #[tokio::test]
    async fn saving_replaces_the_account_set() {
        let repo = SeaOrmOfficeRepository::new(test_database().await);
        let mut office = repo.save(new_office("강남점")).await.unwrap();

        office.remove_account(&Account::of("국민은행", "123-456-789"));
        office.add_account(Account::of("우리은행", "555-000-111"));
        office.change_welcome_message(None);
        repo.save(office.clone()).await.unwrap();

        let found = repo.find_by_id(office.id().unwrap()).await.unwrap().unwrap();
        let mut accounts: Vec<_> = found.accounts().iter().cloned().collect();
        accounts.sort();
        assert_eq!(
            accounts,
            vec![
                Account::of("신한은행", "987-654-321"),
                Account::of("우리은행", "555-000-111"),
            ]
        );
        assert_eq!(found.welcome_message(), None);
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_and_nothing_is_written() {
        let repo = SeaOrmOfficeRepository::new(test_database().await);
        repo.save(new_office("강남점")).await.unwrap();

        let err = repo.save(new_office("강남점")).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Duplicate { entity: "Office", field: "name", .. }
        ));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_all_loads_accounts_per_office() {
        let repo = SeaOrmOfficeRepository::new(test_database().await);
        repo.save(new_office("강남점")).await.unwrap();
        repo.save(
            Office::new(NewOffice {
                name: "홍대점".into(),
                ..NewOffice::default()
            })
            .unwrap(),
        )
        .await
        .unwrap();

        let all = repo.find_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["강남점", "홍대점"]);
        assert_eq!(all[0].accounts().len(), 2);
        assert!(all[1].accounts().is_empty());
    }

    #[tokio::test]
    async fn office_with_themes_cannot_be_deleted() {
        let db = test_database().await;
        let offices = SeaOrmOfficeRepository::new(db.clone());
        let themes = SeaOrmThemeRepository::new(db);

        let office = offices.save(new_office("강남점")).await.unwrap();
        let open_time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let theme = themes
            .save(Theme::new(NewTheme::new("우주선", 20_000, open_time), &office).unwrap())
            .await
            .unwrap();

        let err = offices.delete_by_id(office.id().unwrap()).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference { entity: "Theme", .. }));

        themes.delete_by_id(theme.id().unwrap()).await.unwrap();
        offices.delete_by_id(office.id().unwrap()).await.unwrap();
        assert!(!offices.exists_by_id(office.id().unwrap()).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_unknown_office_is_not_found() {
        let repo = SeaOrmOfficeRepository::new(test_database().await);
        let err = repo.delete_by_id(OfficeId(42)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Office", id: 42 }));
    }
}
