use sea_orm::DbErr;

use crate::entities::language::UnknownLanguage;
use crate::entities::{Language, TranslationStatus};

/// Failures raised by the video catalog and the translation lifecycle.
///
/// Lookups that find nothing are not errors; they come back as `None` or
/// an empty list.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input rejected before anything was written.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Video {video_id} not found")]
    VideoNotFound { video_id: i32 },

    #[error("Translation to {language} already exists for video {video_id}")]
    DuplicateTranslation { video_id: i32, language: Language },

    #[error("Cannot move translation from {from} to {to}")]
    InvalidTransition {
        from: TranslationStatus,
        to: TranslationStatus,
    },

    /// The row kept changing underneath a conditional update.
    #[error("Translation {translation_id} is being updated concurrently, retry")]
    ConcurrentUpdate { translation_id: i32 },

    /// A stored row references a parent that no longer exists.
    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<UnknownLanguage> for ServiceError {
    fn from(err: UnknownLanguage) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
