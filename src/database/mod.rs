pub mod json_file;
pub mod migrations;
pub mod models;
pub mod sqlite;

use crate::config::{Config, StorageBackend};
use crate::error::StoreResult;
use anyhow::Result;
use json_file::JsonFileBackend;
use models::{ShiftMap, UserShiftRecord};
use sqlite::SqliteBackend;
use std::future::Future;
use tracing::info;

/// Where the shift mapping is persisted.
///
/// `write` always receives the whole mapping; a backend is free to
/// batch or diff internally as long as a completed `write` is durable.
pub trait StoreBackend: Send + Sync {
    /// Read the persisted mapping, `None` when nothing has been saved yet
    fn read(&self) -> impl Future<Output = StoreResult<Option<ShiftMap>>> + Send;

    /// Replace the persisted mapping
    fn write(&self, shifts: &ShiftMap) -> impl Future<Output = StoreResult<()>> + Send;

    fn describe(&self) -> String;
}

/// Backend chosen at startup from the configuration
#[derive(Debug, Clone)]
pub enum Backend {
    Json(JsonFileBackend),
    Sqlite(SqliteBackend),
}

impl StoreBackend for Backend {
    async fn read(&self) -> StoreResult<Option<ShiftMap>> {
        match self {
            Backend::Json(backend) => backend.read().await,
            Backend::Sqlite(backend) => backend.read().await,
        }
    }

    async fn write(&self, shifts: &ShiftMap) -> StoreResult<()> {
        match self {
            Backend::Json(backend) => backend.write(shifts).await,
            Backend::Sqlite(backend) => backend.write(shifts).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Backend::Json(backend) => backend.describe(),
            Backend::Sqlite(backend) => backend.describe(),
        }
    }
}

pub async fn open_backend(config: &Config) -> Result<Backend> {
    let backend = match config.storage_backend {
        StorageBackend::Json => Backend::Json(JsonFileBackend::new(&config.data_file)),
        StorageBackend::Sqlite => Backend::Sqlite(SqliteBackend::connect(&config.database_url).await?),
    };

    Ok(backend)
}

/// In-memory mapping from user id to shift record, persisted through a backend.
#[derive(Debug)]
pub struct ShiftStore<B> {
    backend: B,
    shifts: ShiftMap,
}

impl<B: StoreBackend> ShiftStore<B> {
    /// Load the persisted mapping; nothing persisted yet means an empty store.
    pub async fn load(backend: B) -> StoreResult<Self> {
        let shifts = backend.read().await?.unwrap_or_default();

        info!(
            "Loaded {} shift records from {}",
            shifts.len(),
            backend.describe()
        );

        Ok(Self { backend, shifts })
    }

    /// Record for `user_id`, created with defaults on first use
    pub fn get(&mut self, user_id: &str) -> &mut UserShiftRecord {
        self.shifts.entry(user_id.to_string()).or_default()
    }

    pub fn find(&self, user_id: &str) -> Option<&UserShiftRecord> {
        self.shifts.get(user_id)
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, &UserShiftRecord)> {
        self.shifts.iter().map(|(id, record)| (id.as_str(), record))
    }

    /// Reset every record to its default, keeping the keys. Returns how many were reset.
    pub fn reset_all(&mut self) -> usize {
        for record in self.shifts.values_mut() {
            *record = UserShiftRecord::default();
        }
        self.shifts.len()
    }

    /// Overwrite the persisted mapping with the in-memory one
    pub async fn save(&self) -> StoreResult<()> {
        self.backend.write(&self.shifts).await
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> &ShiftMap {
        &self.shifts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use models::ShiftSession;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_without_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = ShiftStore::load(JsonFileBackend::new(dir.path().join("data.json")))
            .await
            .unwrap();

        assert_eq!(store.records().count(), 0);
    }

    #[tokio::test]
    async fn test_get_creates_default_record() {
        let dir = tempdir().unwrap();
        let mut store = ShiftStore::load(JsonFileBackend::new(dir.path().join("data.json")))
            .await
            .unwrap();

        assert!(store.find("7").is_none());
        assert_eq!(*store.get("7"), UserShiftRecord::default());
        assert!(store.find("7").is_some());
    }

    #[tokio::test]
    async fn test_save_then_load_in_fresh_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut store = ShiftStore::load(JsonFileBackend::new(&path)).await.unwrap();
        let start = Utc.with_ymd_and_hms(2025, 4, 14, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 4, 14, 17, 0, 0).unwrap();
        {
            let record = store.get("7");
            record.sessions.push(ShiftSession { start, end });
            record.total = 8.0;
        }
        store.get("8").current_start = Some(end);
        store.save().await.unwrap();

        let reloaded = ShiftStore::load(JsonFileBackend::new(&path)).await.unwrap();
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[tokio::test]
    async fn test_reset_all_keeps_users() {
        let dir = tempdir().unwrap();
        let mut store = ShiftStore::load(JsonFileBackend::new(dir.path().join("data.json")))
            .await
            .unwrap();
        store.get("a").total = 3.0;
        store.get("b").current_start = Some(Utc::now());

        assert_eq!(store.reset_all(), 2);
        assert!(store
            .records()
            .all(|(_, record)| *record == UserShiftRecord::default()));
    }

    #[tokio::test]
    async fn test_sqlite_backend_behind_store() {
        let backend = Backend::Sqlite(SqliteBackend::in_memory().await.unwrap());
        let mut store = ShiftStore::load(backend.clone()).await.unwrap();
        store.get("a").total = 1.5;
        store.save().await.unwrap();

        let reloaded = ShiftStore::load(backend).await.unwrap();
        assert_eq!(reloaded.find("a").map(|r| r.total), Some(1.5));
    }
}
