use serde::{Deserialize, Serialize};

use crate::models::variable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

impl From<variable::Model> for Variable {
    fn from(model: variable::Model) -> Self {
        Self {
            key: model.key,
            value: model.value,
        }
    }
}
