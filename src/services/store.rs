//! Storage seam for machines, boot configs and variables.
//!
//! The boot engine only talks to [`BootStore`]; the database and in-memory
//! backends live in [`super::db_store`] and [`super::memory`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::schemas::{BootConfig, Machine, Variable};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Keyed access to the three entity collections.
///
/// Every `save_*` is an idempotent overwrite keyed by the entity's natural key
/// (hostname, title, key). Every `delete_*` returns whether a record existed.
///
/// A machine record has two owners: the boot engine writes only the switching
/// state (`save_switch_state`) and the admin API writes only the assignment
/// (`save_machine_settings`), so neither can undo a concurrent write by the other.
#[async_trait]
pub trait BootStore: Send + Sync {
    // === Machines ===

    async fn get_machine(&self, hostname: &str) -> Result<Option<Machine>>;

    async fn list_machines(&self) -> Result<Vec<Machine>>;

    async fn save_machine(&self, machine: &Machine) -> Result<()>;

    /// Write `use_alternate` and `last_boot` only. Returns false if the machine is gone.
    async fn save_switch_state(
        &self,
        hostname: &str,
        use_alternate: bool,
        last_boot: DateTime<Utc>,
    ) -> Result<bool>;

    /// Write boot assignment, switch type and `time_between` of an existing
    /// machine, leaving its switching state alone. Returns false if the machine is gone.
    async fn save_machine_settings(&self, machine: &Machine) -> Result<bool>;

    async fn delete_machine(&self, hostname: &str) -> Result<bool>;

    // === Boot configs ===

    async fn get_boot_config(&self, title: &str) -> Result<Option<BootConfig>>;

    async fn list_boot_configs(&self) -> Result<Vec<BootConfig>>;

    async fn save_boot_config(&self, boot_config: &BootConfig) -> Result<()>;

    async fn delete_boot_config(&self, title: &str) -> Result<bool>;

    // === Variables ===

    async fn get_variable(&self, key: &str) -> Result<Option<Variable>>;

    async fn list_variables(&self) -> Result<Vec<Variable>>;

    async fn save_variable(&self, variable: &Variable) -> Result<()>;

    async fn delete_variable(&self, key: &str) -> Result<bool>;
}
