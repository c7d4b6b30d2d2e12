//! Bounded comparison history with JSON file persistence
//!
//! Keeps the most recent comparisons, newest first, capped at
//! `MAX_HISTORY_ITEMS` with the oldest record dropped on overflow. The
//! backing file is rewritten after every mutation; persistence problems are
//! logged and never fail the comparison that produced the record.

use crate::core::constants::MAX_HISTORY_ITEMS;
use crate::models::comparison::ComparisonRecord;
use std::collections::VecDeque;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::warn;

/// In-memory history backed by a JSON file
pub struct HistoryStore {
    path: PathBuf,
    entries: Mutex<VecDeque<ComparisonRecord>>,
}

impl HistoryStore {
    /// Load history from the backing file
    ///
    /// A missing file starts an empty history. A file that cannot be read
    /// or parsed is dropped with a warning rather than refusing to start;
    /// its contents are overwritten on the next mutation.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<ComparisonRecord>>(&raw) {
                Ok(records) => {
                    let mut entries: VecDeque<ComparisonRecord> = records.into();
                    entries.truncate(MAX_HISTORY_ITEMS);
                    entries
                }
                Err(e) => {
                    warn!("Ignoring malformed history file {}: {}", path.display(), e);
                    VecDeque::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => VecDeque::new(),
            Err(e) => {
                warn!("Could not read history file {}: {}", path.display(), e);
                VecDeque::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Append a record, evicting the oldest beyond capacity, then persist
    pub async fn record(&self, record: ComparisonRecord) {
        let mut entries = self.entries.lock().await;
        entries.push_front(record);
        entries.truncate(MAX_HISTORY_ITEMS);
        self.persist(&entries).await;
    }

    /// All records, newest first
    pub async fn list(&self) -> Vec<ComparisonRecord> {
        self.entries.lock().await.iter().cloned().collect()
    }

    /// Remove every record and persist the empty history
    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        entries.clear();
        self.persist(&entries).await;
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    async fn persist(&self, entries: &VecDeque<ComparisonRecord>) {
        let records: Vec<&ComparisonRecord> = entries.iter().collect();
        match serde_json::to_vec_pretty(&records) {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(&self.path, bytes).await {
                    warn!(
                        "Failed to write history file {}: {}",
                        self.path.display(),
                        e
                    );
                }
            }
            Err(e) => warn!("Failed to serialize history: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::comparison::{Provider, ProviderResult};
    use tempfile::tempdir;

    fn record(prompt: &str) -> ComparisonRecord {
        ComparisonRecord::new(
            prompt,
            ProviderResult::success(Provider::ChatGpt, format!("{prompt}-a"), 10, None),
            ProviderResult::failure(Provider::Gemini, "Error 500: Internal Server Error".into(), 20),
        )
    }

    #[tokio::test]
    async fn test_records_come_back_newest_first() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::load(dir.path().join("history.json"));

        store.record(record("first")).await;
        store.record(record("second")).await;
        store.record(record("third")).await;

        let listed = store.list().await;
        let prompts: Vec<&str> = listed.iter().map(|r| r.prompt.as_str()).collect();
        assert_eq!(prompts, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_overflow_drops_the_oldest() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::load(dir.path().join("history.json"));

        for i in 0..=MAX_HISTORY_ITEMS {
            store.record(record(&format!("p{i}"))).await;
        }

        let listed = store.list().await;
        assert_eq!(listed.len(), MAX_HISTORY_ITEMS);
        assert_eq!(listed[0].prompt, format!("p{MAX_HISTORY_ITEMS}"));
        assert!(listed.iter().all(|r| r.prompt != "p0"));
    }

    #[tokio::test]
    async fn test_history_survives_a_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        let store = HistoryStore::load(&path);
        store.record(record("kept")).await;
        let before = store.list().await;

        let reloaded = HistoryStore::load(&path);
        assert_eq!(reloaded.list().await, before);
    }

    #[tokio::test]
    async fn test_clear_empties_store_and_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        let store = HistoryStore::load(&path);
        store.record(record("gone soon")).await;
        store.clear().await;

        assert!(store.is_empty().await);
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ComparisonRecord> = serde_json::from_str(&raw).unwrap();
        assert!(parsed.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::load(dir.path().join("nonexistent.json"));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_malformed_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{ not json [").unwrap();

        let store = HistoryStore::load(&path);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_oversized_file_truncates_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        let records: Vec<ComparisonRecord> = (0..MAX_HISTORY_ITEMS + 5)
            .map(|i| record(&format!("p{i}")))
            .collect();
        std::fs::write(&path, serde_json::to_vec(&records).unwrap()).unwrap();

        let store = HistoryStore::load(&path);
        assert_eq!(store.len().await, MAX_HISTORY_ITEMS);
        // The newest entries (front of the stored list) survive.
        assert_eq!(store.list().await[0].prompt, "p0");
    }
}
