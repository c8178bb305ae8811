use serde::{Deserialize, Serialize};

use crate::patch::double_option;

/// Category as exposed to callers; timestamps stay in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub parent_category_id: Option<i32>,
}

impl From<models::category::Model> for Category {
    fn from(m: models::category::Model) -> Self {
        Self { id: m.id, name: m.name, parent_category_id: m.parent_category_id }
    }
}

/// Create input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryInput {
    pub name: String,
    #[serde(default)]
    pub parent_category_id: Option<i32>,
}

/// Partial update. `parent_category_id`: `None` leaves the parent alone,
/// `Some(None)` promotes the category to a root, `Some(Some(id))` re-parents it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub parent_category_id: Option<Option<i32>>,
}
