use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Workers poll for pending jobs by status
        manager
            .create_index(
                Index::create()
                    .name("idx_translations_status")
                    .table(Translations::Table)
                    .col(Translations::Status)
                    .col(Translations::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_translations_status")
                    .table(Translations::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Translations {
    Table,
    Status,
    CreatedAt,
}
