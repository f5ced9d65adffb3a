//! Migration: Create certificates table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Certificates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certificates::Id)
                            .string_len(26)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Certificates::Name).string().not_null())
                    .col(ColumnDef::new(Certificates::Description).text().null())
                    .col(ColumnDef::new(Certificates::Criteria).json().not_null())
                    .col(ColumnDef::new(Certificates::Skills).json().not_null())
                    .col(ColumnDef::new(Certificates::ImagePath).string().null())
                    .col(ColumnDef::new(Certificates::ImageFilename).string().null())
                    .col(
                        ColumnDef::new(Certificates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Certificates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Certificates::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_certificates_deleted_at")
                    .table(Certificates::Table)
                    .col(Certificates::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Certificates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Certificates {
    Table,
    Id,
    Name,
    Description,
    Criteria,
    Skills,
    ImagePath,
    ImageFilename,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
