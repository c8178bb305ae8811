use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{category, errors};

pub const NAME_MAX_LEN: usize = 256;
pub const AUTHOR_MAX_LEN: usize = 256;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub author: String,
    pub category_id: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("book name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("book name longer than {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

pub fn validate_author(author: &str) -> Result<(), errors::ModelError> {
    if author.trim().is_empty() {
        return Err(errors::ModelError::Validation("author required".into()));
    }
    if author.chars().count() > AUTHOR_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("author longer than {AUTHOR_MAX_LEN} characters")));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    author: &str,
    category_id: i32,
    description: Option<&str>,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    validate_author(author)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(name.to_string()),
        author: Set(author.to_string()),
        category_id: Set(category_id),
        description: Set(description.map(str::to_string)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
