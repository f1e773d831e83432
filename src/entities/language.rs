use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages a video can be spoken in or translated to.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Deserialize, Serialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[sea_orm(string_value = "en")]
    En,
    #[sea_orm(string_value = "es")]
    Es,
    #[sea_orm(string_value = "fr")]
    Fr,
    #[sea_orm(string_value = "de")]
    De,
    #[sea_orm(string_value = "it")]
    It,
    #[sea_orm(string_value = "pt")]
    Pt,
    #[sea_orm(string_value = "ru")]
    Ru,
    #[sea_orm(string_value = "ja")]
    Ja,
    #[sea_orm(string_value = "ko")]
    Ko,
    #[sea_orm(string_value = "zh")]
    Zh,
    #[sea_orm(string_value = "ar")]
    Ar,
    #[sea_orm(string_value = "hi")]
    Hi,
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl Language {
    pub fn code(&self) -> String {
        self.to_value()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_value())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    // Same rule as the serde representation: exact lowercase codes only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::iter()
            .find(|lang| lang.to_value() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
