use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_query_documents_popularity")
                    .table(QueryDocuments::Table)
                    .col(QueryDocuments::Collection)
                    .col(QueryDocuments::SearchCount)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_query_documents_popularity")
                    .table(QueryDocuments::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum QueryDocuments {
    Table,
    Collection,
    SearchCount,
}
