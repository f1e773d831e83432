pub mod error;
pub mod extract;
pub mod translations;
pub mod videos;

use axum::{routing::get, Extension, Router};

use crate::catalog::VideoCatalog;
use crate::lifecycle::TranslationManager;

async fn health_check() -> &'static str {
    "OK"
}

/// Routes for the catalog and translation operations.
///
/// Transport concerns (tracing, CORS, metrics) are layered on by the binary.
pub fn router(catalog: VideoCatalog, manager: TranslationManager) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/videos",
            get(videos::list_videos).post(videos::register_video),
        )
        .route("/videos/:id", get(videos::get_video))
        .route(
            "/videos/:id/translations",
            get(translations::list_video_translations).post(translations::create_translation),
        )
        .route("/translations", get(translations::list_translations))
        .route(
            "/translations/:id",
            get(translations::get_translation).patch(translations::update_translation),
        )
        .layer(Extension(catalog))
        .layer(Extension(manager))
}
