pub mod app;
pub mod database;

pub use app::{AppConfig, StoreBackend};
pub use database::DatabaseConfig;
