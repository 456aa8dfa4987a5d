use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Roadmap, Tag};

/// Full roadmap as returned to clients. Ids and counts are decimal strings so
/// JavaScript clients never lose precision above 2^53.
///
/// Stars and progress are not tracked yet and are left out rather than zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner_id: String,
    pub issue_count: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_public: bool,
    pub data: String,
}

impl RoadmapView {
    pub fn new(roadmap: Roadmap, issue_count: u64) -> Self {
        Self {
            id: roadmap.id.to_string(),
            name: roadmap.name,
            description: roadmap.description,
            owner_id: roadmap.owner_id.to_string(),
            issue_count: issue_count.to_string(),
            created_at: roadmap.created_at,
            updated_at: roadmap.updated_at,
            is_public: roadmap.is_public,
            data: roadmap.data,
        }
    }
}

/// Summary projection for lists: no timestamps, no payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapMiniView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub issue_count: String,
    pub owner_id: String,
}

impl RoadmapMiniView {
    pub fn new(roadmap: Roadmap, issue_count: u64) -> Self {
        Self {
            id: roadmap.id.to_string(),
            name: roadmap.name,
            description: roadmap.description,
            issue_count: issue_count.to_string(),
            owner_id: roadmap.owner_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsView {
    pub tags: Vec<String>,
}

impl TagsView {
    pub fn from_tags(tags: Vec<Tag>) -> Self {
        Self { tags: tags.into_iter().map(|t| t.name).collect() }
    }
}
