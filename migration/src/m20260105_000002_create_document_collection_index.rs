use sea_orm_migration::prelude::*;

use super::m20260105_000001_create_document_table::Document;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_document_collection")
                    .table(Document::Table)
                    .col(Document::Collection)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_document_collection")
                    .table(Document::Table)
                    .to_owned(),
            )
            .await
    }
}
