//! Create accounts table (office account sets)

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_offices::Offices;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::OfficeId).integer().not_null())
                    .col(ColumnDef::new(Accounts::BankName).string().not_null())
                    .col(ColumnDef::new(Accounts::AccountNumber).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(Accounts::OfficeId)
                            .col(Accounts::BankName)
                            .col(Accounts::AccountNumber),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_office")
                            .from(Accounts::Table, Accounts::OfficeId)
                            .to(Offices::Table, Offices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Accounts {
    Table,
    OfficeId,
    BankName,
    AccountNumber,
}
