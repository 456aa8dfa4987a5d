//! Create `issue` table with FK to `roadmap`.
//!
//! `user_id` is the creator as resolved from the session; like
//! `roadmap.owner_id` it lives in the users service and has no FK here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Issue::Table)
                    .if_not_exists()
                    .col(big_integer(Issue::Id).primary_key().auto_increment())
                    .col(big_integer(Issue::RoadmapId).not_null())
                    .col(big_integer(Issue::UserId).not_null())
                    .col(boolean(Issue::Open).not_null().default(true))
                    .col(string_len(Issue::Title, 255).not_null())
                    .col(
                        ColumnDef::new(Issue::Content)
                            .text()
                            .null(),
                    )
                    .col(timestamp_with_time_zone(Issue::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Issue::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issue_roadmap")
                            .from(Issue::Table, Issue::RoadmapId)
                            .to(Roadmap::Table, Roadmap::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Issue::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Issue { Table, Id, RoadmapId, UserId, Open, Title, Content, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Roadmap { Table, Id }
