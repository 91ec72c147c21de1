//! Migration: Create boot_configs table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BootConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BootConfigs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BootConfigs::Title)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(BootConfigs::Config).text().not_null())
                    .col(
                        ColumnDef::new(BootConfigs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_boot_configs_title")
                    .table(BootConfigs::Table)
                    .col(BootConfigs::Title)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BootConfigs::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BootConfigs {
    Table,
    Id,
    Title,
    Config,
    #[iden = "updated_at"]
    UpdatedAt,
}
