use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::roadmap;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roadmap_tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub roadmap_id: i64,
    pub name: String,
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

pub async fn create(db: &DatabaseConnection, roadmap_id: i64, name: &str) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("tag name required".into())); }
    if name.len() > 64 { return Err(errors::ModelError::Validation("tag name too long (<=64)".into())); }
    let am = ActiveModel {
        roadmap_id: Set(roadmap_id),
        name: Set(name.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
