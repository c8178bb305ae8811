use serde::{Deserialize, Serialize};

use crate::category::domain::Category;
use crate::patch::double_option;

/// Book as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub category_id: i32,
    pub description: Option<String>,
}

impl From<models::book::Model> for Book {
    fn from(m: models::book::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            author: m.author,
            category_id: m.category_id,
            description: m.description,
        }
    }
}

/// Book plus its resolved category; `category` is null when the id dangles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWithBreadcrumbs {
    #[serde(flatten)]
    pub book: Book,
    /// Top-down paths from the book's category to each leaf below it.
    pub breadcrumbs: Vec<String>,
    /// Root-to-category path.
    pub ancestor_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookInput {
    pub name: String,
    pub author: String,
    pub category_id: i32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update. `description: null` clears it; an absent key leaves it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}
