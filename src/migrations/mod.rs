pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_boot_configs;
mod m20260301_000002_create_variables;
mod m20260301_000003_create_machines;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_boot_configs::Migration),
            Box::new(m20260301_000002_create_variables::Migration),
            Box::new(m20260301_000003_create_machines::Migration),
        ]
    }
}
