use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::warn;

use models::{issue, roadmap, roadmap_tag};

use super::RoadmapStore;
use crate::domain::{Issue, IssueId, Roadmap, RoadmapId, Tag, UNASSIGNED_ID};
use crate::errors::ServiceError;

/// Postgres-backed store. `DatabaseConnection` is a pool handle, so one
/// instance is shared by every request.
#[derive(Clone)]
pub struct SeaOrmRoadmapStore {
    pub db: DatabaseConnection,
}

impl SeaOrmRoadmapStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

impl From<roadmap::Model> for Roadmap {
    fn from(m: roadmap::Model) -> Self {
        Roadmap {
            id: m.id,
            owner_id: m.owner_id,
            name: m.name,
            description: m.description,
            is_public: m.is_public,
            data: m.data,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<roadmap_tag::Model> for Tag {
    fn from(m: roadmap_tag::Model) -> Self {
        Tag { id: m.id, roadmap_id: m.roadmap_id, name: m.name }
    }
}

impl From<issue::Model> for Issue {
    fn from(m: issue::Model) -> Self {
        Issue {
            id: m.id,
            roadmap_id: m.roadmap_id,
            user_id: m.user_id,
            open: m.open,
            title: m.title,
            content: m.content,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl RoadmapStore for SeaOrmRoadmapStore {
    async fn get_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>, ServiceError> {
        let found = roadmap::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.map(Roadmap::from))
    }

    async fn count_issues(&self, roadmap_id: RoadmapId) -> Result<u64, ServiceError> {
        issue::Entity::find()
            .filter(issue::Column::RoadmapId.eq(roadmap_id))
            .count(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn list_tags(&self, roadmap_id: RoadmapId) -> Result<Vec<Tag>, ServiceError> {
        let rows = roadmap_tag::Entity::find()
            .filter(roadmap_tag::Column::RoadmapId.eq(roadmap_id))
            .order_by_asc(roadmap_tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn get_issue(&self, id: IssueId) -> Result<Option<Issue>, ServiceError> {
        let found = issue::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.map(Issue::from))
    }

    async fn insert_issue(&self, new: &Issue) -> Result<IssueId, ServiceError> {
        let am = issue::ActiveModel {
            id: NotSet,
            roadmap_id: Set(new.roadmap_id),
            user_id: Set(new.user_id),
            open: Set(new.open),
            title: Set(new.title.clone()),
            content: Set(new.content.clone()),
            created_at: Set(new.created_at.into()),
            updated_at: Set(new.updated_at.into()),
        };
        match am.insert(&self.db).await {
            Ok(m) => Ok(m.id),
            // the row was refused (e.g. roadmap missing or deleted meanwhile)
            Err(e) if matches!(
                e.sql_err(),
                Some(SqlErr::ForeignKeyConstraintViolation(_) | SqlErr::UniqueConstraintViolation(_))
            ) =>
            {
                warn!(roadmap_id = new.roadmap_id, err = %e, "issue insert rejected");
                Ok(UNASSIGNED_ID)
            }
            Err(e) => Err(ServiceError::Db(e.to_string())),
        }
    }

    async fn delete_issue(&self, id: IssueId) -> Result<bool, ServiceError> {
        let res = issue::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, issue_by, skip_db_tests};
    use uuid::Uuid;

    #[tokio::test]
    async fn seaorm_store_round_trip() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;
        let store = SeaOrmRoadmapStore::new(db.clone());

        let rm = roadmap::create(&db, 3, &format!("svc_roadmap_{}", Uuid::new_v4()), "d", true, "{}").await?;
        roadmap_tag::create(&db, rm.id, "rust").await?;

        let found = store.get_roadmap(rm.id).await?.expect("roadmap present");
        assert_eq!(found.owner_id, 3);
        assert_eq!(store.list_tags(rm.id).await?.len(), 1);
        assert_eq!(store.count_issues(rm.id).await?, 0);

        let id = store.insert_issue(&issue_by(rm.id, 5)).await?;
        assert!(id > 0);
        assert_eq!(store.count_issues(rm.id).await?, 1);
        assert_eq!(store.get_issue(id).await?.map(|i| i.user_id), Some(5));

        assert!(store.delete_issue(id).await?);
        assert!(!store.delete_issue(id).await?);

        let orphan = store.insert_issue(&issue_by(i64::MAX, 5)).await?;
        assert!(orphan < 0);

        roadmap::hard_delete(&db, rm.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn insert_on_closed_pool_is_db_error() -> Result<(), anyhow::Error> {
        if skip_db_tests() { return Ok(()); }
        let db = get_db().await?;
        let store = SeaOrmRoadmapStore::new(db.clone());
        db.close().await?;

        let res = store.insert_issue(&issue_by(1, 5)).await;
        assert!(matches!(res, Err(ServiceError::Db(_))), "got {res:?}");
        Ok(())
    }
}
