#![cfg(test)]
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

use crate::domain::{Issue, RoadmapId, UserId, UNASSIGNED_ID};
use crate::errors::ServiceError;
use crate::users::{ProfileView, RemoteProfile, UserDirectory};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Database tests need a reachable Postgres; skip unless `DATABASE_URL` is provided.
pub fn skip_db_tests() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}

fn test_db_config() -> DatabaseConfig {
    let mut cfg = DatabaseConfig::default();
    cfg.normalize_from_env();
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = 1;
    cfg.acquire_timeout_secs = 10;
    cfg
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&test_db_config()).await?;
            migration::Migrator::up(&db, None).await?;
            drop(db);
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Return a fresh connection for the current test's runtime
    let db = connect_with_config(&test_db_config()).await?;
    Ok(db)
}

/// An unsaved issue on `roadmap_id` created by `user_id`.
pub fn issue_by(roadmap_id: RoadmapId, user_id: UserId) -> Issue {
    let now = Utc::now();
    Issue {
        id: UNASSIGNED_ID,
        roadmap_id,
        user_id,
        open: true,
        title: "Write the parser".into(),
        content: Some("lexer first".into()),
        created_at: now,
        updated_at: now,
    }
}

/// Users directory answering every call with a canned outcome.
pub struct StubDirectory {
    pub status: u16,
    pub body: Option<serde_json::Value>,
    pub fail: bool,
    pub calls: std::sync::Mutex<Vec<(UserId, ProfileView)>>,
}

impl StubDirectory {
    pub fn ok(body: serde_json::Value) -> Arc<Self> {
        Arc::new(Self { status: 200, body: Some(body), fail: false, calls: Default::default() })
    }

    pub fn status(status: u16, body: Option<serde_json::Value>) -> Arc<Self> {
        Arc::new(Self { status, body, fail: false, calls: Default::default() })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self { status: 0, body: None, fail: true, calls: Default::default() })
    }

    pub fn calls(&self) -> Vec<(UserId, ProfileView)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserDirectory for StubDirectory {
    async fn fetch_profile(&self, user_id: UserId, view: ProfileView) -> Result<RemoteProfile, ServiceError> {
        self.calls.lock().unwrap().push((user_id, view));
        if self.fail {
            return Err(ServiceError::Dependency("connection refused".into()));
        }
        Ok(RemoteProfile { status: self.status, body: self.body.clone() })
    }
}
