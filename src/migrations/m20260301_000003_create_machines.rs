//! Migration: Create machines table
//!
//! Boot configs are referenced by title rather than by foreign key so a
//! deleted config surfaces as a dangling reference at boot time.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Machines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Machines::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Machines::Hostname)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Machines::DefaultBoot).string().not_null())
                    .col(ColumnDef::new(Machines::AlternateBoot).string().not_null())
                    .col(
                        ColumnDef::new(Machines::SwitchType)
                            .string_len(16)
                            .not_null()
                            .default("switched"),
                    )
                    .col(
                        ColumnDef::new(Machines::UseAlternate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Machines::LastBoot)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Machines::TimeBetween)
                            .integer()
                            .not_null()
                            .default(600),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_machines_hostname")
                    .table(Machines::Table)
                    .col(Machines::Hostname)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Machines::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Machines {
    Table,
    Id,
    Hostname,
    #[iden = "default_boot"]
    DefaultBoot,
    #[iden = "alternate_boot"]
    AlternateBoot,
    #[iden = "switch_type"]
    SwitchType,
    #[iden = "use_alternate"]
    UseAlternate,
    #[iden = "last_boot"]
    LastBoot,
    #[iden = "time_between"]
    TimeBetween,
}
