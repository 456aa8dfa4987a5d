use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::roadmap;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issue")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub roadmap_id: i64,
    /// Creator, taken from the session at creation time.
    pub user_id: i64,
    pub open: bool,
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Roadmap,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Roadmap => Entity::belongs_to(roadmap::Entity).from(Column::RoadmapId).to(roadmap::Column::Id).into() }
    }
}

impl Related<roadmap::Entity> for Entity {
    fn to() -> RelationDef { Relation::Roadmap.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() { return Err(errors::ModelError::Validation("title required".into())); }
    if title.len() > 255 { return Err(errors::ModelError::Validation("title too long (<=255)".into())); }
    Ok(())
}
