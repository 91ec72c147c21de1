//! Administrative upsert/lookup/delete of machines, boot configs and variables.
//!
//! Upserts look the entity up by natural key, create it when absent and
//! overwrite its mutable fields when present. A machine's switching state
//! (`use_alternate`, `last_boot`) survives an upsert untouched.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::schemas::{BootConfig, Machine, MachineUpsert, Variable};
use crate::services::store::BootStore;

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn BootStore>,
    default_time_between: i32,
}

fn require_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::NotAcceptable(format!("{} must not be empty", field)));
    }
    Ok(())
}

impl InventoryService {
    pub fn new(store: Arc<dyn BootStore>, default_time_between: i32) -> Self {
        Self {
            store,
            default_time_between,
        }
    }

    async fn require_boot_config(&self, title: &str) -> Result<()> {
        if self.store.get_boot_config(title).await?.is_none() {
            return Err(AppError::NotAcceptable(format!(
                "unknown boot config '{}'",
                title
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Machines
    // =========================================================================

    pub async fn list_hostnames(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .list_machines()
            .await?
            .into_iter()
            .map(|m| m.hostname)
            .collect())
    }

    pub async fn get_machine(&self, hostname: &str) -> Result<Machine> {
        self.store
            .get_machine(hostname)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("unknown machine '{}'", hostname)))
    }

    pub async fn upsert_machine(&self, data: MachineUpsert) -> Result<Machine> {
        require_name("hostname", &data.hostname)?;
        if let Some(seconds) = data.time_between {
            if seconds < 0 {
                return Err(AppError::NotAcceptable(
                    "time_between must not be negative".to_string(),
                ));
            }
        }
        self.require_boot_config(&data.default_boot).await?;
        self.require_boot_config(&data.alternate_boot).await?;

        let hostname = data.hostname.clone();
        match self.store.get_machine(&hostname).await? {
            Some(existing) => {
                let settings = Machine {
                    default_boot: data.default_boot,
                    alternate_boot: data.alternate_boot,
                    switch_type: data.switch_type,
                    time_between: data.time_between.unwrap_or(existing.time_between),
                    ..existing
                };
                // Switching state is left to the boot engine
                if !self.store.save_machine_settings(&settings).await? {
                    return Err(AppError::NotFound(format!("unknown machine '{}'", hostname)));
                }
            }
            None => {
                tracing::info!("Registering machine {}", hostname);
                let machine = Machine::new(
                    data.hostname,
                    data.default_boot,
                    data.alternate_boot,
                    data.switch_type,
                )
                .with_time_between(data.time_between.unwrap_or(self.default_time_between));
                self.store.save_machine(&machine).await?;
            }
        }

        self.get_machine(&hostname).await
    }

    pub async fn delete_machine(&self, hostname: &str) -> Result<()> {
        if !self.store.delete_machine(hostname).await? {
            return Err(AppError::NotFound(format!("unknown machine '{}'", hostname)));
        }
        tracing::info!("Deleted machine {}", hostname);
        Ok(())
    }

    // =========================================================================
    // Boot configs
    // =========================================================================

    pub async fn list_boot_config_titles(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .list_boot_configs()
            .await?
            .into_iter()
            .map(|bc| bc.title)
            .collect())
    }

    pub async fn get_boot_config(&self, title: &str) -> Result<BootConfig> {
        self.store
            .get_boot_config(title)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("unknown boot config '{}'", title)))
    }

    pub async fn upsert_boot_config(&self, data: BootConfig) -> Result<BootConfig> {
        require_name("title", &data.title)?;
        self.store.save_boot_config(&data).await?;
        Ok(data)
    }

    /// Machines still pointing at a deleted config will fail to boot with a
    /// dangling-reference error until they are updated.
    pub async fn delete_boot_config(&self, title: &str) -> Result<()> {
        if !self.store.delete_boot_config(title).await? {
            return Err(AppError::NotFound(format!("unknown boot config '{}'", title)));
        }

        let orphaned: Vec<String> = self
            .store
            .list_machines()
            .await?
            .into_iter()
            .filter(|m| m.default_boot == title || m.alternate_boot == title)
            .map(|m| m.hostname)
            .collect();
        if !orphaned.is_empty() {
            tracing::warn!(
                "Deleted boot config {} is still referenced by: {}",
                title,
                orphaned.join(", ")
            );
        }
        Ok(())
    }

    // =========================================================================
    // Variables
    // =========================================================================

    pub async fn list_variable_keys(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .list_variables()
            .await?
            .into_iter()
            .map(|v| v.key)
            .collect())
    }

    pub async fn get_variable(&self, key: &str) -> Result<Variable> {
        self.store
            .get_variable(key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("unknown variable '{}'", key)))
    }

    pub async fn upsert_variable(&self, data: Variable) -> Result<Variable> {
        require_name("key", &data.key)?;
        self.store.save_variable(&data).await?;
        Ok(data)
    }

    pub async fn delete_variable(&self, key: &str) -> Result<()> {
        if !self.store.delete_variable(key).await? {
            return Err(AppError::NotFound(format!("unknown variable '{}'", key)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::machine::SwitchType;
    use crate::services::memory::MemoryStore;

    async fn inventory() -> InventoryService {
        let store: Arc<dyn BootStore> = Arc::new(MemoryStore::new());
        let inventory = InventoryService::new(store, 600);
        for title in ["install", "rescue"] {
            inventory
                .upsert_boot_config(BootConfig {
                    title: title.to_string(),
                    config: format!("#!ipxe\n{}", title),
                })
                .await
                .unwrap();
        }
        inventory
    }

    fn upsert(hostname: &str, switch_type: SwitchType) -> MachineUpsert {
        MachineUpsert {
            hostname: hostname.to_string(),
            default_boot: "install".to_string(),
            alternate_boot: "rescue".to_string(),
            switch_type,
            time_between: None,
        }
    }

    #[tokio::test]
    async fn test_new_machine_defaults() {
        let inventory = inventory().await;
        let machine = inventory
            .upsert_machine(upsert("pxe01", SwitchType::Timed))
            .await
            .unwrap();

        assert!(!machine.use_alternate);
        assert_eq!(machine.last_boot.timestamp(), 0);
        assert_eq!(machine.time_between, 600);
    }

    #[tokio::test]
    async fn test_upsert_preserves_switching_state() {
        let inventory = inventory().await;
        let machine = inventory
            .upsert_machine(upsert("pxe01", SwitchType::Switched))
            .await
            .unwrap();
        inventory
            .store
            .save_switch_state(&machine.hostname, true, machine.last_boot)
            .await
            .unwrap();

        let mut update = upsert("pxe01", SwitchType::Alternating);
        update.default_boot = "rescue".to_string();
        update.time_between = Some(30);
        let updated = inventory.upsert_machine(update).await.unwrap();

        assert!(updated.use_alternate);
        assert_eq!(updated.default_boot, "rescue");
        assert_eq!(updated.switch_type, SwitchType::Alternating);
        assert_eq!(updated.time_between, 30);
        assert_eq!(inventory.list_hostnames().await.unwrap(), vec!["pxe01"]);
    }

    #[tokio::test]
    async fn test_upsert_rejects_unknown_boot_config() {
        let inventory = inventory().await;
        let mut data = upsert("pxe01", SwitchType::Switched);
        data.alternate_boot = "memtest".to_string();

        let err = inventory.upsert_machine(data).await.unwrap_err();
        assert!(matches!(err, AppError::NotAcceptable(ref msg) if msg.contains("memtest")));
        assert!(inventory.list_hostnames().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_rejects_negative_time_between() {
        let inventory = inventory().await;
        let mut data = upsert("pxe01", SwitchType::Timed);
        data.time_between = Some(-1);
        assert!(matches!(
            inventory.upsert_machine(data).await,
            Err(AppError::NotAcceptable(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_entities_is_not_found() {
        let inventory = inventory().await;
        assert!(matches!(
            inventory.delete_machine("ghost").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            inventory.delete_variable("ghost").await,
            Err(AppError::NotFound(_))
        ));
        inventory.delete_boot_config("install").await.unwrap();
        assert!(matches!(
            inventory.delete_boot_config("install").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_variable_upsert_overwrites_value() {
        let inventory = inventory().await;
        for value in ["10.0.0.1", "10.0.0.2"] {
            inventory
                .upsert_variable(Variable {
                    key: "server".to_string(),
                    value: value.to_string(),
                })
                .await
                .unwrap();
        }
        assert_eq!(inventory.get_variable("server").await.unwrap().value, "10.0.0.2");
        assert_eq!(inventory.list_variable_keys().await.unwrap(), vec!["server"]);
    }

    #[tokio::test]
    async fn test_empty_names_rejected() {
        let inventory = inventory().await;
        let err = inventory
            .upsert_variable(Variable {
                key: " ".to_string(),
                value: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotAcceptable(_)));
    }
}
