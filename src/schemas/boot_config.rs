use serde::{Deserialize, Serialize};

use crate::models::boot_config;

/// A named boot script; also the upsert body for `/api/v1/boot_config/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BootConfig {
    pub title: String,
    pub config: String,
}

impl From<boot_config::Model> for BootConfig {
    fn from(model: boot_config::Model) -> Self {
        Self {
            title: model.title,
            config: model.config,
        }
    }
}
