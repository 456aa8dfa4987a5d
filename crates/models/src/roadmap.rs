use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roadmap")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub is_public: bool,
    /// Opaque client payload, stored and returned verbatim.
    pub data: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Tags,
    Issues,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Tags => Entity::has_many(crate::roadmap_tag::Entity).into(),
            Relation::Issues => Entity::has_many(crate::issue::Entity).into(),
        }
    }
}

impl Related<crate::roadmap_tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tags.def() }
}

impl Related<crate::issue::Entity> for Entity {
    fn to() -> RelationDef { Relation::Issues.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    if name.len() > 255 { return Err(errors::ModelError::Validation("name too long (<=255)".into())); }
    Ok(())
}

/// Insert a roadmap. Roadmaps are authored elsewhere; this is used for seeding and tests.
pub async fn create(db: &DatabaseConnection, owner_id: i64, name: &str, description: &str, is_public: bool, data: &str) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        owner_id: Set(owner_id),
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        is_public: Set(is_public),
        data: Set(data.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
