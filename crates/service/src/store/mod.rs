//! Storage access for roadmaps, their tags, and issues.
//!
//! Services depend on `RoadmapStore` only. `seaorm::SeaOrmRoadmapStore` wraps a
//! pooled connection; `mock::MemoryRoadmapStore` keeps everything in memory.

use async_trait::async_trait;

use crate::domain::{Issue, IssueId, Roadmap, RoadmapId, Tag};
use crate::errors::ServiceError;

pub mod seaorm;

pub use seaorm::SeaOrmRoadmapStore;

#[async_trait]
pub trait RoadmapStore: Send + Sync {
    async fn get_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>, ServiceError>;
    async fn count_issues(&self, roadmap_id: RoadmapId) -> Result<u64, ServiceError>;
    /// Tags of a roadmap in scan order (ascending tag id).
    async fn list_tags(&self, roadmap_id: RoadmapId) -> Result<Vec<Tag>, ServiceError>;
    async fn get_issue(&self, id: IssueId) -> Result<Option<Issue>, ServiceError>;
    /// Persist an issue, ignoring its `id`. Returns the assigned id, or a
    /// negative id when the store refused the row.
    async fn insert_issue(&self, issue: &Issue) -> Result<IssueId, ServiceError>;
    /// Returns whether a row was actually removed.
    async fn delete_issue(&self, id: IssueId) -> Result<bool, ServiceError>;
}

/// In-memory store for tests and local runs without Postgres.
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;

    use crate::domain::{UserId, UNASSIGNED_ID};

    #[derive(Default)]
    struct Inner {
        roadmaps: BTreeMap<RoadmapId, Roadmap>,
        tags: BTreeMap<i64, Tag>,
        issues: BTreeMap<IssueId, Issue>,
        last_id: i64,
        reject_inserts: bool,
        reject_deletes: bool,
    }

    impl Inner {
        fn next_id(&mut self) -> i64 {
            self.last_id += 1;
            self.last_id
        }

        fn bump_to(&mut self, id: i64) {
            if id > self.last_id {
                self.last_id = id;
            }
        }
    }

    /// Ids are drawn from one sequence shared by all three collections.
    #[derive(Default)]
    pub struct MemoryRoadmapStore {
        inner: Mutex<Inner>,
    }

    impl MemoryRoadmapStore {
        pub fn new() -> Self { Self::default() }

        fn lock(&self) -> Result<MutexGuard<'_, Inner>, ServiceError> {
            self.inner.lock().map_err(|_| ServiceError::Db("memory store lock poisoned".into()))
        }

        fn seed_lock(&self) -> MutexGuard<'_, Inner> {
            self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        /// Add a roadmap with a store-assigned id.
        pub fn add_roadmap(&self, owner_id: UserId, name: &str) -> Roadmap {
            let mut inner = self.seed_lock();
            let now = Utc::now();
            let roadmap = Roadmap {
                id: inner.next_id(),
                owner_id,
                name: name.to_string(),
                description: format!("{name} description"),
                is_public: true,
                data: "{}".to_string(),
                created_at: now,
                updated_at: now,
            };
            inner.roadmaps.insert(roadmap.id, roadmap.clone());
            roadmap
        }

        /// Add a roadmap exactly as given, keeping its id.
        pub fn put_roadmap(&self, roadmap: Roadmap) {
            let mut inner = self.seed_lock();
            inner.bump_to(roadmap.id);
            inner.roadmaps.insert(roadmap.id, roadmap);
        }

        pub fn remove_roadmap(&self, id: RoadmapId) -> Option<Roadmap> {
            self.seed_lock().roadmaps.remove(&id)
        }

        pub fn add_tag(&self, roadmap_id: RoadmapId, name: &str) -> Tag {
            let mut inner = self.seed_lock();
            let tag = Tag { id: inner.next_id(), roadmap_id, name: name.to_string() };
            inner.tags.insert(tag.id, tag.clone());
            tag
        }

        /// Add an issue as given, keeping its id.
        pub fn put_issue(&self, issue: Issue) {
            let mut inner = self.seed_lock();
            inner.bump_to(issue.id);
            inner.issues.insert(issue.id, issue);
        }

        pub fn issue(&self, id: IssueId) -> Option<Issue> {
            self.seed_lock().issues.get(&id).cloned()
        }

        pub fn issue_count(&self) -> usize {
            self.seed_lock().issues.len()
        }

        /// Make every following insert report a negative id.
        pub fn reject_inserts(&self, reject: bool) {
            self.seed_lock().reject_inserts = reject;
        }

        /// Make every following delete report that nothing was removed.
        pub fn reject_deletes(&self, reject: bool) {
            self.seed_lock().reject_deletes = reject;
        }
    }

    #[async_trait]
    impl RoadmapStore for MemoryRoadmapStore {
        async fn get_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>, ServiceError> {
            Ok(self.lock()?.roadmaps.get(&id).cloned())
        }

        async fn count_issues(&self, roadmap_id: RoadmapId) -> Result<u64, ServiceError> {
            let inner = self.lock()?;
            Ok(inner.issues.values().filter(|i| i.roadmap_id == roadmap_id).count() as u64)
        }

        async fn list_tags(&self, roadmap_id: RoadmapId) -> Result<Vec<Tag>, ServiceError> {
            let inner = self.lock()?;
            Ok(inner.tags.values().filter(|t| t.roadmap_id == roadmap_id).cloned().collect())
        }

        async fn get_issue(&self, id: IssueId) -> Result<Option<Issue>, ServiceError> {
            Ok(self.lock()?.issues.get(&id).cloned())
        }

        async fn insert_issue(&self, issue: &Issue) -> Result<IssueId, ServiceError> {
            let mut inner = self.lock()?;
            // mirrors the FK from issue.roadmap_id to roadmap.id
            if inner.reject_inserts || !inner.roadmaps.contains_key(&issue.roadmap_id) {
                return Ok(UNASSIGNED_ID);
            }
            let id = inner.next_id();
            inner.issues.insert(id, Issue { id, ..issue.clone() });
            Ok(id)
        }

        async fn delete_issue(&self, id: IssueId) -> Result<bool, ServiceError> {
            let mut inner = self.lock()?;
            if inner.reject_deletes {
                return Ok(false);
            }
            Ok(inner.issues.remove(&id).is_some())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MemoryRoadmapStore;
    use super::*;
    use crate::test_support::issue_by;

    #[tokio::test]
    async fn memory_store_assigns_ids_and_scans_by_roadmap() -> Result<(), anyhow::Error> {
        let store = MemoryRoadmapStore::new();
        let a = store.add_roadmap(1, "a");
        let b = store.add_roadmap(2, "b");
        store.add_tag(a.id, "first");
        store.add_tag(b.id, "other");
        store.add_tag(a.id, "second");

        let names: Vec<_> = store.list_tags(a.id).await?.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["first", "second"]);

        let id = store.insert_issue(&issue_by(a.id, 1)).await?;
        assert!(id > 0);
        assert_eq!(store.count_issues(a.id).await?, 1);
        assert_eq!(store.count_issues(b.id).await?, 0);
        assert_eq!(store.get_issue(id).await?.map(|i| i.id), Some(id));
        Ok(())
    }

    #[tokio::test]
    async fn memory_store_refuses_orphan_issue() -> Result<(), anyhow::Error> {
        let store = MemoryRoadmapStore::new();
        let id = store.insert_issue(&issue_by(404, 1)).await?;
        assert!(id < 0);
        assert_eq!(store.issue_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn memory_store_delete_reports_absence() -> Result<(), anyhow::Error> {
        let store = MemoryRoadmapStore::new();
        let rm = store.add_roadmap(1, "a");
        let id = store.insert_issue(&issue_by(rm.id, 1)).await?;
        assert!(store.delete_issue(id).await?);
        assert!(!store.delete_issue(id).await?);
        Ok(())
    }
}
