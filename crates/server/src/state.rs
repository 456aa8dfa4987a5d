use std::sync::Arc;

use service::session::SessionResolver;
use service::store::RoadmapStore;
use service::users::UserDirectory;
use service::{IssueService, RoadmapService};

pub type Roadmaps = RoadmapService<dyn RoadmapStore, dyn UserDirectory>;
pub type Issues = IssueService<dyn RoadmapStore>;

/// Shared handles for every handler. Cloning is cheap.
#[derive(Clone)]
pub struct ServerState {
    pub roadmaps: Arc<Roadmaps>,
    pub issues: Arc<Issues>,
    pub sessions: Arc<dyn SessionResolver>,
}

impl ServerState {
    pub fn new(
        store: Arc<dyn RoadmapStore>,
        users: Arc<dyn UserDirectory>,
        sessions: Arc<dyn SessionResolver>,
    ) -> Self {
        Self {
            roadmaps: Arc::new(RoadmapService::new(store.clone(), users)),
            issues: Arc::new(IssueService::new(store)),
            sessions,
        }
    }
}
