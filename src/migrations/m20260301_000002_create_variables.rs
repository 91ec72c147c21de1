//! Migration: Create variables table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Variables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Variables::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Variables::Key).string().not_null().unique_key())
                    .col(ColumnDef::new(Variables::Value).string().not_null())
                    .col(
                        ColumnDef::new(Variables::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Variables::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Variables {
    Table,
    Id,
    Key,
    Value,
    #[iden = "updated_at"]
    UpdatedAt,
}
