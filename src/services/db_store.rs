//! sea-orm backed [`BootStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use crate::db::DbConn;
use crate::models::prelude::*;
use crate::models::{boot_config, machine, variable};
use crate::schemas;
use crate::services::store::{BootStore, Result, StoreError};

/// Store backed by the application database
#[derive(Clone)]
pub struct DbStore {
    db: DbConn,
}

impl DbStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn find_machine(&self, hostname: &str) -> Result<Option<machine::Model>> {
        Ok(Machine::find()
            .filter(machine::Column::Hostname.eq(hostname))
            .one(&self.db)
            .await?)
    }

    async fn find_boot_config(&self, title: &str) -> Result<Option<boot_config::Model>> {
        Ok(BootConfig::find()
            .filter(boot_config::Column::Title.eq(title))
            .one(&self.db)
            .await?)
    }

    async fn find_variable(&self, key: &str) -> Result<Option<variable::Model>> {
        Ok(Variable::find()
            .filter(variable::Column::Key.eq(key))
            .one(&self.db)
            .await?)
    }
}

fn machine_from_model(model: machine::Model) -> Result<schemas::Machine> {
    if model.time_between < 0 {
        return Err(StoreError::Corrupt(format!(
            "machine '{}' has negative time_between {}",
            model.hostname, model.time_between
        )));
    }
    Ok(model.into())
}

#[async_trait]
impl BootStore for DbStore {
    // === Machines ===

    async fn get_machine(&self, hostname: &str) -> Result<Option<schemas::Machine>> {
        self.find_machine(hostname)
            .await?
            .map(machine_from_model)
            .transpose()
    }

    async fn list_machines(&self) -> Result<Vec<schemas::Machine>> {
        Machine::find()
            .order_by_asc(machine::Column::Hostname)
            .all(&self.db)
            .await?
            .into_iter()
            .map(machine_from_model)
            .collect()
    }

    async fn save_machine(&self, m: &schemas::Machine) -> Result<()> {
        match self.find_machine(&m.hostname).await? {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.default_boot = Set(m.default_boot.clone());
                active.alternate_boot = Set(m.alternate_boot.clone());
                active.switch_type = Set(m.switch_type);
                active.use_alternate = Set(m.use_alternate);
                active.last_boot = Set(m.last_boot);
                active.time_between = Set(m.time_between);
                active.update(&self.db).await?;
            }
            None => {
                let new_machine = machine::ActiveModel {
                    hostname: Set(m.hostname.clone()),
                    default_boot: Set(m.default_boot.clone()),
                    alternate_boot: Set(m.alternate_boot.clone()),
                    switch_type: Set(m.switch_type),
                    use_alternate: Set(m.use_alternate),
                    last_boot: Set(m.last_boot),
                    time_between: Set(m.time_between),
                    ..Default::default()
                };
                new_machine.insert(&self.db).await?;
            }
        }
        Ok(())
    }

    async fn save_switch_state(
        &self,
        hostname: &str,
        use_alternate: bool,
        last_boot: DateTime<Utc>,
    ) -> Result<bool> {
        let result = Machine::update_many()
            .col_expr(machine::Column::UseAlternate, Expr::value(use_alternate))
            .col_expr(machine::Column::LastBoot, Expr::value(last_boot))
            .filter(machine::Column::Hostname.eq(hostname))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn save_machine_settings(&self, m: &schemas::Machine) -> Result<bool> {
        let result = Machine::update_many()
            .col_expr(machine::Column::DefaultBoot, Expr::value(m.default_boot.clone()))
            .col_expr(machine::Column::AlternateBoot, Expr::value(m.alternate_boot.clone()))
            .col_expr(machine::Column::SwitchType, Expr::value(m.switch_type.to_string()))
            .col_expr(machine::Column::TimeBetween, Expr::value(m.time_between))
            .filter(machine::Column::Hostname.eq(m.hostname.as_str()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_machine(&self, hostname: &str) -> Result<bool> {
        let result = Machine::delete_many()
            .filter(machine::Column::Hostname.eq(hostname))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    // === Boot configs ===

    async fn get_boot_config(&self, title: &str) -> Result<Option<schemas::BootConfig>> {
        Ok(self.find_boot_config(title).await?.map(Into::into))
    }

    async fn list_boot_configs(&self) -> Result<Vec<schemas::BootConfig>> {
        Ok(BootConfig::find()
            .order_by_asc(boot_config::Column::Title)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn save_boot_config(&self, bc: &schemas::BootConfig) -> Result<()> {
        let now = Utc::now();
        match self.find_boot_config(&bc.title).await? {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.config = Set(bc.config.clone());
                active.updated_at = Set(now);
                active.update(&self.db).await?;
            }
            None => {
                let new_config = boot_config::ActiveModel {
                    title: Set(bc.title.clone()),
                    config: Set(bc.config.clone()),
                    updated_at: Set(now),
                    ..Default::default()
                };
                new_config.insert(&self.db).await?;
            }
        }
        Ok(())
    }

    async fn delete_boot_config(&self, title: &str) -> Result<bool> {
        let result = BootConfig::delete_many()
            .filter(boot_config::Column::Title.eq(title))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    // === Variables ===

    async fn get_variable(&self, key: &str) -> Result<Option<schemas::Variable>> {
        Ok(self.find_variable(key).await?.map(Into::into))
    }

    async fn list_variables(&self) -> Result<Vec<schemas::Variable>> {
        Ok(Variable::find()
            .order_by_asc(variable::Column::Key)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn save_variable(&self, v: &schemas::Variable) -> Result<()> {
        let now = Utc::now();
        match self.find_variable(&v.key).await? {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.value = Set(v.value.clone());
                active.updated_at = Set(now);
                active.update(&self.db).await?;
            }
            None => {
                let new_variable = variable::ActiveModel {
                    key: Set(v.key.clone()),
                    value: Set(v.value.clone()),
                    updated_at: Set(now),
                    ..Default::default()
                };
                new_variable.insert(&self.db).await?;
            }
        }
        Ok(())
    }

    async fn delete_variable(&self, key: &str) -> Result<bool> {
        let result = Variable::delete_many()
            .filter(variable::Column::Key.eq(key))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
