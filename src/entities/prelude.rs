pub use super::language::Language;
pub use super::translation::{Entity as Translation, TranslationStatus};
pub use super::video::Entity as Video;
