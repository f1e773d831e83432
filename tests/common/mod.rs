#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use videodub_server::catalog::{NewVideo, VideoCatalog};
use videodub_server::entities::Language;
use videodub_server::lifecycle::{TranslationManager, TransitionPolicy};
use videodub_server::migrator::Migrator;

/// Fresh in-memory database with every migration applied.
///
/// A single pooled connection keeps the whole test on one SQLite memory
/// database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn services(policy: TransitionPolicy) -> (VideoCatalog, TranslationManager) {
    let db = setup_db().await;
    let catalog = VideoCatalog::new(db.clone());
    let manager = TranslationManager::new(db, catalog.clone()).with_policy(policy);
    (catalog, manager)
}

pub fn sample_video(name: &str) -> NewVideo {
    NewVideo {
        filename: format!("{name}-stored.mp4"),
        original_filename: format!("{name}.mp4"),
        file_path: format!("uploads/{name}-stored.mp4"),
        file_size: 1_024_000,
        duration: Some(95),
        mime_type: "video/mp4".to_string(),
        original_language: Some(Language::En),
    }
}
