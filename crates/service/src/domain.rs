use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RoadmapId = i64;
pub type IssueId = i64;
pub type UserId = i64;

/// Id carried by a record that the store has not assigned one to yet.
pub const UNASSIGNED_ID: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub id: RoadmapId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub data: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub roadmap_id: RoadmapId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub roadmap_id: RoadmapId,
    pub user_id: UserId,
    pub open: bool,
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated caller of a mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: UserId,
}

impl CallerIdentity {
    pub fn new(user_id: UserId) -> Self { Self { user_id } }
}
