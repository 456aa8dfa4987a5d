//! Create `roadmap` table.
//!
//! Root entity; tags and issues reference it. `owner_id` points at a user
//! owned by the separate users service, so it carries no FK.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roadmap::Table)
                    .if_not_exists()
                    .col(big_integer(Roadmap::Id).primary_key().auto_increment())
                    .col(big_integer(Roadmap::OwnerId).not_null())
                    .col(string_len(Roadmap::Name, 255).not_null())
                    .col(text(Roadmap::Description).not_null())
                    .col(boolean(Roadmap::IsPublic).not_null().default(true))
                    .col(text(Roadmap::Data).not_null())
                    .col(timestamp_with_time_zone(Roadmap::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Roadmap::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Roadmap::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Roadmap { Table, Id, OwnerId, Name, Description, IsPublic, Data, CreatedAt, UpdatedAt }
