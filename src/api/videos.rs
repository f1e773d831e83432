use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::catalog::{NewVideo, VideoCatalog};
use crate::entities::Language;
use crate::error::ServiceError;

#[derive(Deserialize)]
pub struct RegisterVideoRequest {
    pub filename: String,
    pub original_filename: String,
    pub file_path: String,
    pub file_size: i64,
    pub duration: Option<i32>,
    pub mime_type: String,
    pub original_language: Option<String>,
}

impl TryFrom<RegisterVideoRequest> for NewVideo {
    type Error = ServiceError;

    fn try_from(req: RegisterVideoRequest) -> Result<Self, Self::Error> {
        let original_language = req
            .original_language
            .as_deref()
            .map(str::parse::<Language>)
            .transpose()?;

        Ok(NewVideo {
            filename: req.filename,
            original_filename: req.original_filename,
            file_path: req.file_path,
            file_size: req.file_size,
            duration: req.duration,
            mime_type: req.mime_type,
            original_language,
        })
    }
}

// POST /videos
pub async fn register_video(
    Extension(catalog): Extension<VideoCatalog>,
    ApiJson(payload): ApiJson<RegisterVideoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let metadata = NewVideo::try_from(payload)?;
    let video = catalog.register_video(metadata).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

// GET /videos
pub async fn list_videos(
    Extension(catalog): Extension<VideoCatalog>,
) -> Result<impl IntoResponse, ApiError> {
    let videos = catalog.list_videos().await?;
    Ok(Json(videos))
}

// GET /videos/:id
pub async fn get_video(
    Extension(catalog): Extension<VideoCatalog>,
    ApiPath(video_id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match catalog.get_video_by_id(video_id).await? {
        Some(video) => Ok(Json(video)),
        None => Err(ApiError::NotFound {
            entity: "Video",
            id: video_id,
        }),
    }
}
