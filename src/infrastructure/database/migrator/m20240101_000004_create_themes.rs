//! Create themes table

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_offices::Offices;
use crate::domain::theme::model::DEFAULT_CAPACITY;
use crate::shared::validations::MAX_NAME_LENGTH;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Themes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Themes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Themes::Name)
                            .string_len(MAX_NAME_LENGTH as u32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Themes::Price).integer().not_null())
                    .col(ColumnDef::new(Themes::OpenTime).time().not_null())
                    .col(
                        ColumnDef::new(Themes::DiscountAmount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Themes::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Themes::Capacity)
                            .integer()
                            .not_null()
                            .default(DEFAULT_CAPACITY),
                    )
                    .col(ColumnDef::new(Themes::OfficeId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_theme_office")
                            .from(Themes::Table, Themes::OfficeId)
                            .to(Offices::Table, Offices::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_themes_name")
                    .table(Themes::Table)
                    .col(Themes::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_themes_office_id")
                    .table(Themes::Table)
                    .col(Themes::OfficeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Themes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Themes {
    Table,
    Id,
    Name,
    Price,
    OpenTime,
    DiscountAmount,
    IsAvailable,
    Capacity,
    OfficeId,
}
