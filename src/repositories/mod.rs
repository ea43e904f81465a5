pub mod history_repository;
pub mod kv_store;
pub mod settings_repository;

pub use history_repository::HistoryRepository;
pub use kv_store::{InMemoryStore, JsonFileStore, KeyValueStore};
pub use settings_repository::SettingsRepository;
