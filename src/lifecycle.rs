//! Translation jobs: creation rules, progress updates and joined queries.
//!
//! The translation work itself happens in an external worker. It reports
//! back through [`TranslationManager::update_translation_progress`], which
//! is the only way a job changes state.

use std::str::FromStr;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TryIntoModel,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{error, info, warn};

use crate::catalog::VideoCatalog;
use crate::entities::{translation, video, Language, Translation, TranslationStatus, Video};
use crate::error::{ServiceError, ServiceResult};
use crate::timestamps;

const MAX_UPDATE_ATTEMPTS: usize = 8;

/// How strictly status changes reported by workers are checked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Any status may be written at any time. Workers may call back out of
    /// order, so this is the default.
    #[default]
    Permissive,
    /// Only the moves allowed by [`TranslationStatus::can_transition_to`].
    Strict,
}

impl TransitionPolicy {
    pub fn check(&self, from: TranslationStatus, to: TranslationStatus) -> ServiceResult<()> {
        match self {
            TransitionPolicy::Permissive => Ok(()),
            TransitionPolicy::Strict if from.can_transition_to(to) => Ok(()),
            TransitionPolicy::Strict => Err(ServiceError::InvalidTransition { from, to }),
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "strict" => Ok(TransitionPolicy::Strict),
            other => Err(format!(
                "unknown transition policy '{}', expected 'permissive' or 'strict'",
                other
            )),
        }
    }
}

// Lets a present-but-null field deserialize to `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update reported by a worker.
///
/// For nullable columns the outer `Option` says whether the field was sent
/// at all and the inner one carries the new value, so `Some(None)` clears a
/// previously stored value while `None` leaves it untouched.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationProgressUpdate {
    #[serde(default)]
    pub status: Option<TranslationStatus>,
    #[serde(default)]
    pub progress_percentage: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub translated_audio_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub transcript_original: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub transcript_translated: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub error_message: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub started_at: Option<Option<chrono::NaiveDateTime>>,
    #[serde(default, deserialize_with = "present")]
    pub completed_at: Option<Option<chrono::NaiveDateTime>>,
}

impl TranslationProgressUpdate {
    fn validate(&self) -> ServiceResult<()> {
        match self.progress_percentage {
            Some(p) if !(0..=100).contains(&p) => Err(ServiceError::Validation(format!(
                "progress_percentage must be between 0 and 100, got {}",
                p
            ))),
            _ => Ok(()),
        }
    }

    fn apply(&self, active: &mut translation::ActiveModel) {
        if let Some(status) = self.status {
            active.status = Set(status);
        }
        if let Some(progress) = self.progress_percentage {
            active.progress_percentage = Set(progress);
        }
        if let Some(path) = &self.translated_audio_path {
            active.translated_audio_path = Set(path.clone());
        }
        if let Some(text) = &self.transcript_original {
            active.transcript_original = Set(text.clone());
        }
        if let Some(text) = &self.transcript_translated {
            active.transcript_translated = Set(text.clone());
        }
        if let Some(message) = &self.error_message {
            active.error_message = Set(message.clone());
        }
        if let Some(at) = self.started_at {
            active.started_at = Set(at);
        }
        if let Some(at) = self.completed_at {
            active.completed_at = Set(at);
        }
    }
}

/// A translation together with the full record of the video it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranslationWithVideo {
    #[serde(flatten)]
    pub translation: translation::Model,
    pub video: video::Model,
}

fn join_video(
    (translation, video): (translation::Model, Option<video::Model>),
) -> ServiceResult<TranslationWithVideo> {
    match video {
        Some(video) => Ok(TranslationWithVideo { translation, video }),
        None => Err(ServiceError::Integrity(format!(
            "translation {} references missing video {}",
            translation.id, translation.video_id
        ))),
    }
}

fn classify_insert_error(err: DbErr, video_id: i32, language: Language) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ServiceError::DuplicateTranslation { video_id, language }
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ServiceError::VideoNotFound { video_id },
        _ => ServiceError::Database(err),
    }
}

#[derive(Clone)]
pub struct TranslationManager {
    db: DatabaseConnection,
    catalog: VideoCatalog,
    policy: TransitionPolicy,
}

impl TranslationManager {
    pub fn new(db: DatabaseConnection, catalog: VideoCatalog) -> Self {
        Self {
            db,
            catalog,
            policy: TransitionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Opens a `pending` translation of `video_id` into `target_language`.
    ///
    /// The (video, language) pair is unique in storage, so the insert itself
    /// decides whether the job is a duplicate.
    pub async fn create_translation(
        &self,
        video_id: i32,
        target_language: Language,
    ) -> ServiceResult<translation::Model> {
        if !self.catalog.video_exists(video_id).await? {
            warn!(video_id, "Translation requested for unknown video");
            crate::metrics::record_rejection("video_not_found");
            return Err(ServiceError::VideoNotFound { video_id });
        }

        let now = timestamps::now();
        let new_translation = translation::ActiveModel {
            video_id: Set(video_id),
            target_language: Set(target_language),
            status: Set(TranslationStatus::Pending),
            progress_percentage: Set(0),
            translated_audio_path: Set(None),
            transcript_original: Set(None),
            transcript_translated: Set(None),
            error_message: Set(None),
            started_at: Set(None),
            completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match new_translation.insert(&self.db).await {
            Ok(saved) => {
                info!(
                    translation_id = saved.id,
                    video_id,
                    language = %target_language,
                    "Created translation"
                );
                crate::metrics::record_translation_created(target_language);
                Ok(saved)
            }
            Err(e) => {
                let err = classify_insert_error(e, video_id, target_language);
                match &err {
                    ServiceError::Database(db_err) => {
                        error!("Failed to insert translation: {}", db_err)
                    }
                    ServiceError::VideoNotFound { .. } => {
                        warn!(video_id, "Video disappeared before translation insert");
                        crate::metrics::record_rejection("video_not_found");
                    }
                    other => {
                        warn!(video_id, language = %target_language, "{}", other);
                        crate::metrics::record_rejection("duplicate_translation");
                    }
                }
                Err(err)
            }
        }
    }

    /// Writes the fields present in `update` and refreshes `updated_at`.
    ///
    /// Returns `Ok(None)` without writing anything when the translation does
    /// not exist.
    pub async fn update_translation_progress(
        &self,
        translation_id: i32,
        update: TranslationProgressUpdate,
    ) -> ServiceResult<Option<translation::Model>> {
        if let Err(e) = update.validate() {
            crate::metrics::record_rejection("invalid_progress");
            return Err(e);
        }

        // Compare-and-swap on (status, updated_at): a concurrent writer makes
        // the conditional update miss, and the row is re-read and re-checked.
        let mut attempts = 0;
        let (from, saved) = loop {
            let Some(current) = Translation::find_by_id(translation_id).one(&self.db).await?
            else {
                return Ok(None);
            };

            let from = current.status;
            if let Some(to) = update.status {
                if let Err(e) = self.policy.check(from, to) {
                    warn!(translation_id, "{}", e);
                    crate::metrics::record_rejection("invalid_transition");
                    return Err(e);
                }
            }

            let seen_at = current.updated_at;
            let mut active: translation::ActiveModel = current.into();
            update.apply(&mut active);
            active.updated_at = Set(timestamps::after(seen_at));
            let next = active.clone().try_into_model()?;

            let result = Translation::update_many()
                .set(active)
                .filter(translation::Column::Id.eq(translation_id))
                .filter(translation::Column::Status.eq(from))
                .filter(translation::Column::UpdatedAt.eq(seen_at))
                .exec(&self.db)
                .await?;
            if result.rows_affected == 1 {
                break (from, next);
            }

            attempts += 1;
            if attempts >= MAX_UPDATE_ATTEMPTS {
                warn!(translation_id, "Gave up on contended translation update");
                crate::metrics::record_rejection("update_contention");
                return Err(ServiceError::ConcurrentUpdate { translation_id });
            }
        };

        if saved.status != from {
            info!(
                translation_id,
                from = %from,
                to = %saved.status,
                progress = saved.progress_percentage,
                "Translation status changed"
            );
            crate::metrics::record_status_change(from, saved.status);
        } else {
            info!(
                translation_id,
                progress = saved.progress_percentage,
                "Translation progress updated"
            );
        }
        Ok(Some(saved))
    }

    /// Translations of one video, newest first. An unknown video simply has
    /// none.
    pub async fn get_translations_for_video(
        &self,
        video_id: i32,
    ) -> ServiceResult<Vec<translation::Model>> {
        let translations = Translation::find()
            .filter(translation::Column::VideoId.eq(video_id))
            .order_by_desc(translation::Column::CreatedAt)
            .order_by_desc(translation::Column::Id)
            .all(&self.db)
            .await?;
        Ok(translations)
    }

    pub async fn get_translation_by_id(
        &self,
        translation_id: i32,
    ) -> ServiceResult<Option<TranslationWithVideo>> {
        Translation::find_by_id(translation_id)
            .find_also_related(Video)
            .one(&self.db)
            .await?
            .map(join_video)
            .transpose()
    }

    pub async fn get_all_translations(&self) -> ServiceResult<Vec<TranslationWithVideo>> {
        Translation::find()
            .find_also_related(Video)
            .order_by_desc(translation::Column::CreatedAt)
            .order_by_desc(translation::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(join_video)
            .collect()
    }

    /// Jobs in `status`, oldest first, for workers polling for work.
    pub async fn get_translations_by_status(
        &self,
        status: TranslationStatus,
    ) -> ServiceResult<Vec<TranslationWithVideo>> {
        Translation::find()
            .filter(translation::Column::Status.eq(status))
            .find_also_related(Video)
            .order_by_asc(translation::Column::CreatedAt)
            .order_by_asc(translation::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(join_video)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_stay_absent() {
        let update: TranslationProgressUpdate =
            serde_json::from_str(r#"{"status": "processing", "progress_percentage": 50}"#).unwrap();
        assert_eq!(update.status, Some(TranslationStatus::Processing));
        assert_eq!(update.progress_percentage, Some(50));
        assert_eq!(update.error_message, None);
        assert_eq!(update.completed_at, None);
    }

    #[test]
    fn explicit_null_clears_a_field() {
        let update: TranslationProgressUpdate =
            serde_json::from_str(r#"{"error_message": null, "translated_audio_path": "out/es.mp3"}"#)
                .unwrap();
        assert_eq!(update.error_message, Some(None));
        assert_eq!(
            update.translated_audio_path,
            Some(Some("out/es.mp3".to_string()))
        );
        assert_eq!(update.transcript_original, None);
    }

    #[test]
    fn milestone_timestamps_parse() {
        let update: TranslationProgressUpdate =
            serde_json::from_str(r#"{"completed_at": "2026-03-01T12:30:00"}"#).unwrap();
        let expected = chrono::NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert_eq!(update.completed_at, Some(Some(expected)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<TranslationProgressUpdate>(r#"{"video_id": 3}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn progress_outside_range_fails_validation() {
        for bad in [-1, 101] {
            let update = TranslationProgressUpdate {
                progress_percentage: Some(bad),
                ..Default::default()
            };
            assert!(matches!(update.validate(), Err(ServiceError::Validation(_))));
        }
        let ok = TranslationProgressUpdate {
            progress_percentage: Some(100),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn strict_policy_rejects_leaving_a_terminal_state() {
        let err = TransitionPolicy::Strict
            .check(TranslationStatus::Completed, TranslationStatus::Pending)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot move translation from completed to pending"
        );
        assert!(TransitionPolicy::Permissive
            .check(TranslationStatus::Completed, TranslationStatus::Pending)
            .is_ok());
    }

    #[test]
    fn policy_parses_from_config_values() {
        assert_eq!(
            "strict".parse::<TransitionPolicy>(),
            Ok(TransitionPolicy::Strict)
        );
        assert_eq!(
            " Permissive ".parse::<TransitionPolicy>(),
            Ok(TransitionPolicy::Permissive)
        );
        assert!("lenient".parse::<TransitionPolicy>().is_err());
    }
}
