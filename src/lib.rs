pub mod api;
pub mod catalog;
pub mod config;
pub mod entities;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod migrator;
pub mod telemetry;
mod timestamps;

pub use sea_orm;
