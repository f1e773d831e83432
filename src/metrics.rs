use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Iterable, PaginatorTrait, QueryFilter};

use crate::entities::{prelude::*, translation};

/// Seeds the gauges from what is already stored.
pub async fn init_metrics(db: &DatabaseConnection) {
    let video_count = Video::find().count(db).await.unwrap_or(0);
    ::metrics::gauge!("videodub_videos_total").set(video_count as f64);

    let mut translation_count = 0;
    for status in TranslationStatus::iter() {
        let count = Translation::find()
            .filter(translation::Column::Status.eq(status))
            .count(db)
            .await
            .unwrap_or(0);
        translation_count += count;
        ::metrics::gauge!("videodub_translations_total", "status" => status.to_string())
            .set(count as f64);
    }

    tracing::info!(
        "Initialized metrics: Videos={}, Translations={}",
        video_count,
        translation_count
    );
}

pub fn record_video_registered() {
    ::metrics::counter!("videodub_videos_registered_total").increment(1);
    ::metrics::gauge!("videodub_videos_total").increment(1.0);
}

pub fn record_translation_created(language: Language) {
    ::metrics::counter!("videodub_translations_created_total", "language" => language.code())
        .increment(1);
    ::metrics::gauge!("videodub_translations_total", "status" => TranslationStatus::Pending.to_string())
        .increment(1.0);
}

pub fn record_status_change(from: TranslationStatus, to: TranslationStatus) {
    ::metrics::counter!(
        "videodub_translation_status_changes_total",
        "from" => from.to_string(),
        "to" => to.to_string()
    )
    .increment(1);
    ::metrics::gauge!("videodub_translations_total", "status" => from.to_string()).decrement(1.0);
    ::metrics::gauge!("videodub_translations_total", "status" => to.to_string()).increment(1.0);
}

pub fn record_rejection(reason: &'static str) {
    ::metrics::counter!("videodub_translation_rejections_total", "reason" => reason).increment(1);
}
