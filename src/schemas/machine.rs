use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::boot::DEFAULT_TIME_BETWEEN;
use crate::models::machine::{self, SwitchType};

/// A machine's boot assignment and switching state.
///
/// Boot configs are referenced by title and resolved through the store when a
/// boot is served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Machine {
    pub hostname: String,
    pub default_boot: String,
    pub alternate_boot: String,
    pub switch_type: SwitchType,
    pub use_alternate: bool,
    #[schema(value_type = String)]
    pub last_boot: DateTime<Utc>,
    pub time_between: i32,
}

impl Machine {
    /// A freshly registered machine: default config first, last boot at the epoch
    pub fn new(
        hostname: impl Into<String>,
        default_boot: impl Into<String>,
        alternate_boot: impl Into<String>,
        switch_type: SwitchType,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            default_boot: default_boot.into(),
            alternate_boot: alternate_boot.into(),
            switch_type,
            use_alternate: false,
            last_boot: DateTime::<Utc>::UNIX_EPOCH,
            time_between: DEFAULT_TIME_BETWEEN,
        }
    }

    pub fn with_time_between(mut self, seconds: i32) -> Self {
        self.time_between = seconds;
        self
    }
}

impl From<machine::Model> for Machine {
    fn from(model: machine::Model) -> Self {
        Self {
            hostname: model.hostname,
            default_boot: model.default_boot,
            alternate_boot: model.alternate_boot,
            switch_type: model.switch_type,
            use_alternate: model.use_alternate,
            last_boot: model.last_boot,
            time_between: model.time_between,
        }
    }
}

/// Upsert body for `/api/v1/machine/`.
///
/// Switching state (`use_alternate`, `last_boot`) is owned by the boot engine
/// and cannot be set here.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct MachineUpsert {
    pub hostname: String,
    pub default_boot: String,
    pub alternate_boot: String,
    #[serde(default = "default_switch_type")]
    pub switch_type: SwitchType,
    pub time_between: Option<i32>,
}

fn default_switch_type() -> SwitchType {
    SwitchType::Switched
}
