use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Videos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Videos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Videos::Filename).string().not_null())
                    .col(ColumnDef::new(Videos::OriginalFilename).string().not_null())
                    .col(ColumnDef::new(Videos::FilePath).text().not_null())
                    .col(ColumnDef::new(Videos::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Videos::Duration).integer().null())
                    .col(ColumnDef::new(Videos::MimeType).string().not_null())
                    .col(ColumnDef::new(Videos::OriginalLanguage).string_len(8).null())
                    .col(ColumnDef::new(Videos::UploadedAt).date_time().not_null())
                    .col(ColumnDef::new(Videos::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Listing is always newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_videos_uploaded_at")
                    .table(Videos::Table)
                    .col(Videos::UploadedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Videos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Videos {
    Table,
    Id,
    Filename,
    OriginalFilename,
    FilePath,
    FileSize,
    Duration,
    MimeType,
    OriginalLanguage,
    UploadedAt,
    UpdatedAt,
}
