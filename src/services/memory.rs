//! In-memory storage backend
//!
//! Simple storage for testing and ephemeral runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::schemas::{BootConfig, Machine, Variable};
use crate::services::store::{BootStore, Result};

/// In-memory storage backend, keyed and ordered by natural key
#[derive(Default)]
pub struct MemoryStore {
    machines: RwLock<BTreeMap<String, Machine>>,
    boot_configs: RwLock<BTreeMap<String, BootConfig>>,
    variables: RwLock<BTreeMap<String, Variable>>,
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BootStore for MemoryStore {
    // === Machine Operations ===

    async fn get_machine(&self, hostname: &str) -> Result<Option<Machine>> {
        Ok(self.machines.read().get(hostname).cloned())
    }

    async fn list_machines(&self) -> Result<Vec<Machine>> {
        Ok(self.machines.read().values().cloned().collect())
    }

    async fn save_machine(&self, machine: &Machine) -> Result<()> {
        self.machines
            .write()
            .insert(machine.hostname.clone(), machine.clone());
        Ok(())
    }

    async fn save_switch_state(
        &self,
        hostname: &str,
        use_alternate: bool,
        last_boot: DateTime<Utc>,
    ) -> Result<bool> {
        Ok(match self.machines.write().get_mut(hostname) {
            Some(machine) => {
                machine.use_alternate = use_alternate;
                machine.last_boot = last_boot;
                true
            }
            None => false,
        })
    }

    async fn save_machine_settings(&self, settings: &Machine) -> Result<bool> {
        Ok(match self.machines.write().get_mut(&settings.hostname) {
            Some(machine) => {
                machine.default_boot = settings.default_boot.clone();
                machine.alternate_boot = settings.alternate_boot.clone();
                machine.switch_type = settings.switch_type;
                machine.time_between = settings.time_between;
                true
            }
            None => false,
        })
    }

    async fn delete_machine(&self, hostname: &str) -> Result<bool> {
        Ok(self.machines.write().remove(hostname).is_some())
    }

    // === Boot Config Operations ===

    async fn get_boot_config(&self, title: &str) -> Result<Option<BootConfig>> {
        Ok(self.boot_configs.read().get(title).cloned())
    }

    async fn list_boot_configs(&self) -> Result<Vec<BootConfig>> {
        Ok(self.boot_configs.read().values().cloned().collect())
    }

    async fn save_boot_config(&self, boot_config: &BootConfig) -> Result<()> {
        self.boot_configs
            .write()
            .insert(boot_config.title.clone(), boot_config.clone());
        Ok(())
    }

    async fn delete_boot_config(&self, title: &str) -> Result<bool> {
        Ok(self.boot_configs.write().remove(title).is_some())
    }

    // === Variable Operations ===

    async fn get_variable(&self, key: &str) -> Result<Option<Variable>> {
        Ok(self.variables.read().get(key).cloned())
    }

    async fn list_variables(&self) -> Result<Vec<Variable>> {
        Ok(self.variables.read().values().cloned().collect())
    }

    async fn save_variable(&self, variable: &Variable) -> Result<()> {
        self.variables
            .write()
            .insert(variable.key.clone(), variable.clone());
        Ok(())
    }

    async fn delete_variable(&self, key: &str) -> Result<bool> {
        Ok(self.variables.write().remove(key).is_some())
    }
}
