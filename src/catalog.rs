use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::{info, warn};

use crate::entities::{video, Language, Video};
use crate::error::{ServiceError, ServiceResult};
use crate::timestamps;

/// Metadata for a video being registered. Nothing here is checked against
/// storage; `file_path` is recorded as given.
#[derive(Clone, Debug)]
pub struct NewVideo {
    pub filename: String,
    pub original_filename: String,
    pub file_path: String,
    pub file_size: i64,
    pub duration: Option<i32>,
    pub mime_type: String,
    pub original_language: Option<Language>,
}

impl NewVideo {
    fn validate(&self) -> ServiceResult<()> {
        if self.file_size <= 0 {
            return Err(ServiceError::Validation(format!(
                "file_size must be positive, got {}",
                self.file_size
            )));
        }
        if let Some(duration) = self.duration {
            if duration <= 0 {
                return Err(ServiceError::Validation(format!(
                    "duration must be positive when present, got {}",
                    duration
                )));
            }
        }
        Ok(())
    }
}

/// Records video metadata and serves it back unmodified.
#[derive(Clone)]
pub struct VideoCatalog {
    db: DatabaseConnection,
}

impl VideoCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn register_video(&self, metadata: NewVideo) -> ServiceResult<video::Model> {
        if let Err(e) = metadata.validate() {
            warn!("Rejected video {}: {}", metadata.original_filename, e);
            crate::metrics::record_rejection("invalid_video");
            return Err(e);
        }

        let now = timestamps::now();
        let new_video = video::ActiveModel {
            filename: Set(metadata.filename),
            original_filename: Set(metadata.original_filename),
            file_path: Set(metadata.file_path),
            file_size: Set(metadata.file_size),
            duration: Set(metadata.duration),
            mime_type: Set(metadata.mime_type),
            original_language: Set(metadata.original_language),
            uploaded_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = new_video.insert(&self.db).await?;
        info!(
            video_id = saved.id,
            file_size = saved.file_size,
            "Registered video {}",
            saved.original_filename
        );
        crate::metrics::record_video_registered();
        Ok(saved)
    }

    /// Every video, most recently uploaded first.
    pub async fn list_videos(&self) -> ServiceResult<Vec<video::Model>> {
        let videos = Video::find()
            .order_by_desc(video::Column::UploadedAt)
            .order_by_desc(video::Column::Id)
            .all(&self.db)
            .await?;
        Ok(videos)
    }

    pub async fn get_video_by_id(&self, id: i32) -> ServiceResult<Option<video::Model>> {
        Ok(Video::find_by_id(id).one(&self.db).await?)
    }

    pub async fn video_exists(&self, id: i32) -> ServiceResult<bool> {
        let count = Video::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }
}
