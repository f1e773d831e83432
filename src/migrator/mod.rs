use sea_orm_migration::prelude::*;

mod m20260301_000001_create_videos_table;
mod m20260301_000002_create_translations_table;
mod m20260305_000001_index_translation_status;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_videos_table::Migration),
            Box::new(m20260301_000002_create_translations_table::Migration),
            Box::new(m20260305_000001_index_translation_status::Migration),
        ]
    }
}
