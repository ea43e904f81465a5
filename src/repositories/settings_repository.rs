use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::{Difficulty, Settings},
    repositories::kv_store::{KeyValueStore, DIFFICULTY_KEY},
};

#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> AppResult<Settings> {
        let difficulty = self
            .store
            .get(DIFFICULTY_KEY)?
            .map(|label| Difficulty::from_label(&label))
            .unwrap_or_default();
        Ok(Settings { difficulty })
    }

    pub fn save_difficulty(&self, difficulty: Difficulty) -> AppResult<()> {
        self.store.set(DIFFICULTY_KEY, difficulty.label())
    }
}
