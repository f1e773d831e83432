use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Translations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Translations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Translations::VideoId).integer().not_null())
                    .col(
                        ColumnDef::new(Translations::TargetLanguage)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Translations::Status)
                            .string_len(16)
                            .default("pending")
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Translations::ProgressPercentage)
                            .integer()
                            .default(0)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Translations::TranslatedAudioPath).text())
                    .col(ColumnDef::new(Translations::TranscriptOriginal).text())
                    .col(ColumnDef::new(Translations::TranscriptTranslated).text())
                    .col(ColumnDef::new(Translations::ErrorMessage).text())
                    .col(ColumnDef::new(Translations::StartedAt).date_time())
                    .col(ColumnDef::new(Translations::CompletedAt).date_time())
                    .col(
                        ColumnDef::new(Translations::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Translations::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_translations_video")
                            .from(Translations::Table, Translations::VideoId)
                            .to(Videos::Table, Videos::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One translation per video and target language
        manager
            .create_index(
                Index::create()
                    .name("idx_translations_video_language")
                    .table(Translations::Table)
                    .col(Translations::VideoId)
                    .col(Translations::TargetLanguage)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_translations_created_at")
                    .table(Translations::Table)
                    .col(Translations::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Translations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Translations {
    Table,
    Id,
    VideoId,
    TargetLanguage,
    Status,
    ProgressPercentage,
    TranslatedAudioPath,
    TranscriptOriginal,
    TranscriptTranslated,
    ErrorMessage,
    StartedAt,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Id,
}
