use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Issue: counted and scanned by roadmap_id
        manager
            .create_index(
                Index::create()
                    .name("idx_issue_roadmap")
                    .table(Issue::Table)
                    .col(Issue::RoadmapId)
                    .to_owned(),
            )
            .await?;

        // RoadmapTag: scanned by roadmap_id
        manager
            .create_index(
                Index::create()
                    .name("idx_roadmaptag_roadmap")
                    .table(RoadmapTag::Table)
                    .col(RoadmapTag::RoadmapId)
                    .to_owned(),
            )
            .await?;

        // Roadmap: lookups by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_roadmap_owner")
                    .table(Roadmap::Table)
                    .col(Roadmap::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_issue_roadmap").table(Issue::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_roadmaptag_roadmap").table(RoadmapTag::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_roadmap_owner").table(Roadmap::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Issue { Table, RoadmapId }

#[derive(DeriveIden)]
enum RoadmapTag { Table, RoadmapId }

#[derive(DeriveIden)]
enum Roadmap { Table, OwnerId }
