//! Create `roadmap_tag` table with FK to `roadmap`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoadmapTag::Table)
                    .if_not_exists()
                    .col(big_integer(RoadmapTag::Id).primary_key().auto_increment())
                    .col(big_integer(RoadmapTag::RoadmapId).not_null())
                    .col(string_len(RoadmapTag::Name, 64).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_roadmaptag_roadmap")
                            .from(RoadmapTag::Table, RoadmapTag::RoadmapId)
                            .to(Roadmap::Table, Roadmap::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RoadmapTag::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum RoadmapTag { Table, Id, RoadmapId, Name }

#[derive(DeriveIden)]
enum Roadmap { Table, Id }
