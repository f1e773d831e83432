use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::entities::{Language, TranslationStatus};
use crate::error::ServiceError;
use crate::lifecycle::{TranslationManager, TranslationProgressUpdate};

#[derive(Deserialize)]
pub struct CreateTranslationRequest {
    pub target_language: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslationFilter {
    pub status: Option<TranslationStatus>,
}

// POST /videos/:id/translations
pub async fn create_translation(
    Extension(manager): Extension<TranslationManager>,
    ApiPath(video_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<CreateTranslationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let language: Language = payload
        .target_language
        .parse()
        .map_err(ServiceError::from)?;
    let translation = manager.create_translation(video_id, language).await?;
    Ok((StatusCode::CREATED, Json(translation)))
}

// GET /videos/:id/translations
pub async fn list_video_translations(
    Extension(manager): Extension<TranslationManager>,
    ApiPath(video_id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let translations = manager.get_translations_for_video(video_id).await?;
    Ok(Json(translations))
}

// GET /translations?status=pending
pub async fn list_translations(
    Extension(manager): Extension<TranslationManager>,
    ApiQuery(filter): ApiQuery<TranslationFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let translations = match filter.status {
        Some(status) => manager.get_translations_by_status(status).await?,
        None => manager.get_all_translations().await?,
    };
    Ok(Json(translations))
}

// GET /translations/:id
pub async fn get_translation(
    Extension(manager): Extension<TranslationManager>,
    ApiPath(translation_id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match manager.get_translation_by_id(translation_id).await? {
        Some(joined) => Ok(Json(joined)),
        None => Err(ApiError::NotFound {
            entity: "Translation",
            id: translation_id,
        }),
    }
}

// PATCH /translations/:id - progress callback from the translation worker
pub async fn update_translation(
    Extension(manager): Extension<TranslationManager>,
    ApiPath(translation_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<TranslationProgressUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    match manager
        .update_translation_progress(translation_id, payload)
        .await?
    {
        Some(translation) => Ok(Json(translation)),
        None => Err(ApiError::NotFound {
            entity: "Translation",
            id: translation_id,
        }),
    }
}
