use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::payload::parse_issue_payload;
use crate::domain::{CallerIdentity, IssueId};
use crate::errors::ServiceError;
use crate::store::RoadmapStore;
use crate::validation::parse_id;

pub const ISSUE_NOT_SAVED: &str = "Issue could not be saved to database.";
pub const ISSUE_NOT_FOUND: &str = "Issue not found.";
pub const ISSUE_ROADMAP_NOT_FOUND: &str = "Roadmap not found.";
pub const NOT_OWNER: &str = "User is not owner of issue or roadmap.";
pub const ISSUE_NOT_DELETED: &str = "Issue could not be deleted.";

/// Body returned by a successful create. The id is rendered as a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueCreated {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub success: bool,
}

pub struct IssueService<S: ?Sized> {
    store: Arc<S>,
}

impl<S> IssueService<S>
where
    S: RoadmapStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    fn require_caller(caller: Option<&CallerIdentity>) -> Result<&CallerIdentity, ServiceError> {
        caller.ok_or(ServiceError::Unauthenticated)
    }

    /// Create an issue under the roadmap addressed by `raw_roadmap_id`.
    ///
    /// The creator is always the caller; identity fields in the payload are
    /// discarded. A roadmap that does not exist surfaces as a storage refusal.
    #[instrument(skip(self, raw_payload))]
    pub async fn create(
        &self,
        raw_roadmap_id: &str,
        raw_payload: &[u8],
        caller: Option<&CallerIdentity>,
    ) -> Result<IssueCreated, ServiceError> {
        let caller = Self::require_caller(caller)?;
        let roadmap_id = parse_id(raw_roadmap_id, "Roadmap")?;
        let payload = parse_issue_payload(raw_payload)?;
        let issue = payload.into_issue(roadmap_id, caller, Utc::now());

        let id: IssueId = self.store.insert_issue(&issue).await?;
        if id < 0 {
            warn!(roadmap_id, user_id = caller.user_id, "issue insert refused");
            return Err(ServiceError::Persistence(ISSUE_NOT_SAVED.to_string()));
        }
        info!(issue_id = id, roadmap_id, user_id = caller.user_id, "issue created");
        Ok(IssueCreated { id: id.to_string() })
    }

    /// Delete an issue. Allowed for the issue's creator and for the owner of
    /// the roadmap it belongs to.
    #[instrument(skip(self))]
    pub async fn delete(&self, raw_issue_id: &str, caller: Option<&CallerIdentity>) -> Result<DeleteAck, ServiceError> {
        let caller = Self::require_caller(caller)?;
        let issue_id = parse_id(raw_issue_id, "Issue")?;

        let issue = self
            .store
            .get_issue(issue_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ISSUE_NOT_FOUND))?;
        let roadmap = self
            .store
            .get_roadmap(issue.roadmap_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ISSUE_ROADMAP_NOT_FOUND))?;

        if caller.user_id != issue.user_id && caller.user_id != roadmap.owner_id {
            warn!(issue_id, user_id = caller.user_id, "delete denied");
            return Err(ServiceError::Forbidden(NOT_OWNER.to_string()));
        }

        if !self.store.delete_issue(issue_id).await? {
            return Err(ServiceError::Persistence(ISSUE_NOT_DELETED.to_string()));
        }
        info!(issue_id, roadmap_id = roadmap.id, user_id = caller.user_id, "issue deleted");
        Ok(DeleteAck { success: true })
    }
}
