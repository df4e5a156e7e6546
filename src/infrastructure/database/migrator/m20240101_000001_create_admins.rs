//! Create admins table

use sea_orm_migration::prelude::*;

use crate::shared::validations::{MAX_LOGIN_ID_LENGTH, MAX_NAME_LENGTH, MAX_PHONE_NUMBER_LENGTH};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::LoginId)
                            .string_len(MAX_LOGIN_ID_LENGTH as u32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Admins::Password).string().not_null())
                    .col(
                        ColumnDef::new(Admins::Name)
                            .string_len(MAX_NAME_LENGTH as u32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Admins::PhoneNumber).string_len(MAX_PHONE_NUMBER_LENGTH as u32))
                    .col(ColumnDef::new(Admins::Role).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Admins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Admins::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admins_login_id")
                    .table(Admins::Table)
                    .col(Admins::LoginId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Admins {
    Table,
    Id,
    LoginId,
    Password,
    Name,
    PhoneNumber,
    Role,
    CreatedAt,
    UpdatedAt,
}
