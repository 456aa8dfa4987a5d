use std::sync::Arc;

use tracing::{error, instrument};

use super::views::{RoadmapMiniView, RoadmapView, TagsView};
use crate::domain::Roadmap;
use crate::errors::ServiceError;
use crate::store::RoadmapStore;
use crate::users::{ForwardedResponse, ProfileView, UserDirectory};
use crate::validation::parse_id;

pub const ROADMAP_NOT_FOUND: &str = "Roadmap does not exist.";

/// Read-only queries over roadmaps. Every operation validates the id and
/// confirms the roadmap exists before doing anything else, so a missing
/// roadmap is always `NotFound`.
pub struct RoadmapService<S: ?Sized, U: ?Sized> {
    store: Arc<S>,
    users: Arc<U>,
}

impl<S, U> RoadmapService<S, U>
where
    S: RoadmapStore + ?Sized,
    U: UserDirectory + ?Sized,
{
    pub fn new(store: Arc<S>, users: Arc<U>) -> Self { Self { store, users } }

    async fn find(&self, raw_id: &str) -> Result<Roadmap, ServiceError> {
        let id = parse_id(raw_id, "Roadmap")?;
        self.store
            .get_roadmap(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ROADMAP_NOT_FOUND))
    }

    #[instrument(skip(self))]
    pub async fn get_full(&self, roadmap_id: &str) -> Result<RoadmapView, ServiceError> {
        let roadmap = self.find(roadmap_id).await?;
        let issue_count = self.store.count_issues(roadmap.id).await?;
        Ok(RoadmapView::new(roadmap, issue_count))
    }

    #[instrument(skip(self))]
    pub async fn get_mini(&self, roadmap_id: &str) -> Result<RoadmapMiniView, ServiceError> {
        let roadmap = self.find(roadmap_id).await?;
        let issue_count = self.store.count_issues(roadmap.id).await?;
        Ok(RoadmapMiniView::new(roadmap, issue_count))
    }

    /// Tag names in scan order. A roadmap without tags yields an empty list.
    #[instrument(skip(self))]
    pub async fn get_tags(&self, roadmap_id: &str) -> Result<TagsView, ServiceError> {
        let roadmap = self.find(roadmap_id).await?;
        let tags = self.store.list_tags(roadmap.id).await?;
        Ok(TagsView::from_tags(tags))
    }

    /// Full owner profile, forwarded from the users service.
    #[instrument(skip(self))]
    pub async fn get_owner(&self, roadmap_id: &str) -> Result<ForwardedResponse, ServiceError> {
        self.owner_profile(roadmap_id, ProfileView::Full).await
    }

    /// Abbreviated owner profile, forwarded from the users service.
    #[instrument(skip(self))]
    pub async fn get_owner_mini(&self, roadmap_id: &str) -> Result<ForwardedResponse, ServiceError> {
        self.owner_profile(roadmap_id, ProfileView::Mini).await
    }

    async fn owner_profile(&self, roadmap_id: &str, view: ProfileView) -> Result<ForwardedResponse, ServiceError> {
        let roadmap = self.find(roadmap_id).await?;
        let forwarded = self
            .users
            .fetch_profile(roadmap.owner_id, view)
            .await
            .and_then(ForwardedResponse::from_remote);
        forwarded.inspect_err(|e| {
            error!(roadmap_id = roadmap.id, owner_id = roadmap.owner_id, ?view, err = %e, "owner lookup failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::MemoryRoadmapStore;
    use crate::test_support::{issue_by, StubDirectory};
    use serde_json::json;

    fn service(store: Arc<MemoryRoadmapStore>, users: Arc<StubDirectory>) -> RoadmapService<MemoryRoadmapStore, StubDirectory> {
        RoadmapService::new(store, users)
    }

    #[tokio::test]
    async fn every_read_on_missing_roadmap_is_not_found() {
        let store = Arc::new(MemoryRoadmapStore::new());
        let users = StubDirectory::ok(json!({"id": "3"}));
        let svc = service(store, users.clone());

        let errs = vec![
            svc.get_full("7").await.unwrap_err(),
            svc.get_mini("7").await.unwrap_err(),
            svc.get_tags("7").await.unwrap_err(),
            svc.get_owner("7").await.unwrap_err(),
            svc.get_owner_mini("7").await.unwrap_err(),
        ];
        for e in errs {
            assert!(matches!(&e, ServiceError::NotFound(m) if m == ROADMAP_NOT_FOUND), "got {e:?}");
        }
        assert!(users.calls().is_empty());
    }

    #[tokio::test]
    async fn malformed_id_is_invalid_argument() {
        let svc = service(Arc::new(MemoryRoadmapStore::new()), StubDirectory::ok(json!({})));
        assert!(matches!(svc.get_full("").await, Err(ServiceError::InvalidArgument(_))));
        assert!(matches!(svc.get_mini("seven").await, Err(ServiceError::InvalidArgument(_))));
        assert!(matches!(svc.get_tags("-7").await, Err(ServiceError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn issue_count_matches_store_state() -> Result<(), anyhow::Error> {
        let store = Arc::new(MemoryRoadmapStore::new());
        let rm = store.add_roadmap(3, "Rust");
        let other = store.add_roadmap(4, "Go");
        let svc = service(store.clone(), StubDirectory::ok(json!({})));

        let full = svc.get_full(&rm.id.to_string()).await?;
        assert_eq!(full.issue_count, "0");

        for _ in 0..3 {
            store.insert_issue(&issue_by(rm.id, 5)).await?;
        }
        store.insert_issue(&issue_by(other.id, 5)).await?;

        let full = svc.get_full(&rm.id.to_string()).await?;
        let mini = svc.get_mini(&rm.id.to_string()).await?;
        assert_eq!(full.issue_count, "3");
        assert_eq!(mini.issue_count, "3");
        assert_eq!(full.owner_id, "3");
        assert_eq!(mini.name, "Rust");
        Ok(())
    }

    #[tokio::test]
    async fn tags_empty_is_success() -> Result<(), anyhow::Error> {
        let store = Arc::new(MemoryRoadmapStore::new());
        let rm = store.add_roadmap(3, "Rust");
        let svc = service(store.clone(), StubDirectory::ok(json!({})));

        assert_eq!(svc.get_tags(&rm.id.to_string()).await?.tags, Vec::<String>::new());

        store.add_tag(rm.id, "systems");
        store.add_tag(rm.id, "backend");
        assert_eq!(svc.get_tags(&rm.id.to_string()).await?.tags, vec!["systems", "backend"]);
        Ok(())
    }

    #[tokio::test]
    async fn owner_profile_is_forwarded_for_the_owner() -> Result<(), anyhow::Error> {
        let store = Arc::new(MemoryRoadmapStore::new());
        let rm = store.add_roadmap(3, "Rust");
        let profile = json!({"id": "3", "name": "Ada", "bio": "compilers"});
        let users = StubDirectory::ok(profile.clone());
        let svc = service(store, users.clone());

        let full = svc.get_owner(&rm.id.to_string()).await?;
        assert_eq!(full.status, 200);
        assert_eq!(full.body, profile);

        svc.get_owner_mini(&rm.id.to_string()).await?;
        assert_eq!(users.calls(), vec![(3, ProfileView::Full), (3, ProfileView::Mini)]);
        Ok(())
    }

    #[tokio::test]
    async fn owner_lookup_failures_are_dependency_failures() {
        let store = Arc::new(MemoryRoadmapStore::new());
        let rm = store.add_roadmap(3, "Rust");
        let id = rm.id.to_string();

        let down = service(store.clone(), StubDirectory::unreachable());
        assert!(matches!(down.get_owner(&id).await, Err(ServiceError::Dependency(_))));

        let missing_user = service(store.clone(), StubDirectory::status(404, Some(json!({"error": "User not found"}))));
        assert!(matches!(missing_user.get_owner_mini(&id).await, Err(ServiceError::Dependency(_))));

        let garbled = service(store, StubDirectory::status(200, None));
        assert!(matches!(garbled.get_owner(&id).await, Err(ServiceError::Dependency(_))));
    }
}
