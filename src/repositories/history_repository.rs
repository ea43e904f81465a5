use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::HistoryItem,
    repositories::kv_store::{KeyValueStore, HISTORY_KEY},
};

/// Newest-first list of completed quizzes, capped at `limit` entries.
#[derive(Clone)]
pub struct HistoryRepository {
    store: Arc<dyn KeyValueStore>,
    limit: usize,
}

impl HistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        Self {
            store,
            limit: limit.max(1),
        }
    }

    /// A stored list that no longer parses is treated as empty and will be
    /// replaced by the next append.
    pub fn list(&self) -> AppResult<Vec<HistoryItem>> {
        let Some(raw) = self.store.get(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                log::warn!("Discarding unreadable quiz history: {err}");
                Ok(Vec::new())
            }
        }
    }

    pub fn recent(&self, count: usize) -> AppResult<Vec<HistoryItem>> {
        let mut items = self.list()?;
        items.truncate(count);
        Ok(items)
    }

    pub fn append(&self, item: HistoryItem) -> AppResult<()> {
        let mut items = self.list()?;
        items.insert(0, item);
        if items.len() > self.limit {
            log::debug!("Trimming quiz history to {} entries", self.limit);
            items.truncate(self.limit);
        }

        let raw = serde_json::to_string(&items)
            .map_err(|e| AppError::StorageError(e.to_string()))?;
        self.store.set(HISTORY_KEY, &raw)
    }
}
