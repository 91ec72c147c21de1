use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Policy deciding which of a machine's two boot configs is served
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum SwitchType {
    /// Serve whatever `use_alternate` says; only a completion signal flips it
    #[sea_orm(string_value = "switched")]
    Switched,
    /// Flip `use_alternate` on every resolution
    #[sea_orm(string_value = "alternating")]
    Alternating,
    /// Serve the alternate config while inside the `time_between` window after the last boot
    #[sea_orm(string_value = "timed")]
    Timed,
}

impl std::fmt::Display for SwitchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwitchType::Switched => write!(f, "switched"),
            SwitchType::Alternating => write!(f, "alternating"),
            SwitchType::Timed => write!(f, "timed"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "machines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub hostname: String,
    /// Title of the boot config served by default
    pub default_boot: String,
    /// Title of the fallback boot config
    pub alternate_boot: String,
    pub switch_type: SwitchType,
    pub use_alternate: bool,
    pub last_boot: DateTimeUtc,
    /// Seconds; only read by the timed policy
    pub time_between: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
