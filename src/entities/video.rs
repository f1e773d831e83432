use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::language::Language;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub filename: String,
    pub original_filename: String,
    // Opaque storage locator, stored as given
    #[sea_orm(column_type = "Text")]
    pub file_path: String,
    pub file_size: i64,
    // Seconds; None until the length is known
    pub duration: Option<i32>,
    pub mime_type: String,
    pub original_language: Option<Language>,
    pub uploaded_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::translation::Entity")]
    Translations,
}

impl Related<super::translation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Translations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
