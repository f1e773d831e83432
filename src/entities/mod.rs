pub mod language;
pub mod translation;
pub mod video;

pub use language::Language;
pub use translation::Entity as Translation;
pub use translation::TranslationStatus;
pub use video::Entity as Video;

pub mod prelude;
