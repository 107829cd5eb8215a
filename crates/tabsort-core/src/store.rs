//! Settings and opened-time persistence
//!
//! One record holds everything: `{ settings, openedAtMap }`, keyed by tab id
//! rendered as a decimal string. Writes are last-write-wins; a load that
//! fails falls back to defaults rather than surfacing an error to a sort.
//!
//! `MemoryStore` backs tests and short-lived runs; `JsonFileStore` persists
//! under the platform data directory.

use crate::error::{Error, Result};
use crate::types::{Settings, Tab, TabId};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Timestamps of when each tab was first observed, epoch milliseconds
pub type OpenedAtMap = HashMap<TabId, i64>;

/// Read/write access to persisted user settings
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load settings, substituting defaults when absent, migrated to the
    /// current schema version
    async fn get_settings(&self) -> Result<Settings>;

    /// Persist settings
    async fn save_settings(&self, settings: &Settings) -> Result<()>;
}

/// Read/write access to the opened-time map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpenedAtStore: Send + Sync {
    /// Load the full opened-time map
    async fn opened_at_map(&self) -> Result<OpenedAtMap>;

    /// Replace the full opened-time map
    async fn save_opened_at_map(&self, map: &OpenedAtMap) -> Result<()>;

    /// Record that a tab was just observed for the first time
    async fn record_tab_opened(&self, tab: TabId) -> Result<()>;

    /// Forget a tab that no longer exists
    async fn remove_tab_opened(&self, tab: TabId) -> Result<()>;
}

/// Persisted record layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredData {
    settings: Settings,
    opened_at_map: HashMap<String, i64>,
}

impl StoredData {
    fn typed_map(&self) -> OpenedAtMap {
        self.opened_at_map
            .iter()
            .filter_map(|(key, &at)| match key.parse::<i64>() {
                Ok(id) => Some((TabId(id), at)),
                Err(_) => {
                    warn!(key = %key, "skipping non-numeric opened-at key");
                    None
                }
            })
            .collect()
    }

    fn set_map(&mut self, map: &OpenedAtMap) {
        self.opened_at_map = map.iter().map(|(id, &at)| (id.to_string(), at)).collect();
    }
}

/// In-memory store for tests and ephemeral runs; contents die with the
/// process
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<StoredData>,
}

impl MemoryStore {
    /// Create an empty store holding default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get_settings(&self) -> Result<Settings> {
        Ok(self.data.lock().await.settings.clone().migrated())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.data.lock().await.settings = settings.clone();
        Ok(())
    }
}

#[async_trait]
impl OpenedAtStore for MemoryStore {
    async fn opened_at_map(&self) -> Result<OpenedAtMap> {
        Ok(self.data.lock().await.typed_map())
    }

    async fn save_opened_at_map(&self, map: &OpenedAtMap) -> Result<()> {
        self.data.lock().await.set_map(map);
        Ok(())
    }

    async fn record_tab_opened(&self, tab: TabId) -> Result<()> {
        let mut data = self.data.lock().await;
        data.opened_at_map
            .insert(tab.to_string(), Utc::now().timestamp_millis());
        Ok(())
    }

    async fn remove_tab_opened(&self, tab: TabId) -> Result<()> {
        self.data.lock().await.opened_at_map.remove(&tab.to_string());
        Ok(())
    }
}

/// JSON-file store under the platform data directory
///
/// The whole record is rewritten on every save; read-modify-write cycles are
/// serialized behind an internal lock.
pub struct JsonFileStore {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Store backed by an explicit file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    /// Store backed by the default location, `<data dir>/tabsort/store.json`
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Resolve the default store path
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| Error::Store("cannot determine data directory".to_string()))?;
        Ok(data_dir.join("tabsort").join("store.json"))
    }

    /// The file this store reads and writes
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoredData {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(data) => data,
                Err(error) => {
                    warn!(path = %self.path.display(), %error, "unreadable store file, using defaults");
                    StoredData::default()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => StoredData::default(),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "store read failed, using defaults");
                StoredData::default()
            }
        }
    }

    async fn persist(&self, data: &StoredData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(data)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), "store persisted");
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn get_settings(&self) -> Result<Settings> {
        let _io = self.io_lock.lock().await;
        Ok(self.load().await.settings.migrated())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        let _io = self.io_lock.lock().await;
        let mut data = self.load().await;
        data.settings = settings.clone();
        self.persist(&data).await
    }
}

#[async_trait]
impl OpenedAtStore for JsonFileStore {
    async fn opened_at_map(&self) -> Result<OpenedAtMap> {
        let _io = self.io_lock.lock().await;
        Ok(self.load().await.typed_map())
    }

    async fn save_opened_at_map(&self, map: &OpenedAtMap) -> Result<()> {
        let _io = self.io_lock.lock().await;
        let mut data = self.load().await;
        data.set_map(map);
        self.persist(&data).await
    }

    async fn record_tab_opened(&self, tab: TabId) -> Result<()> {
        let _io = self.io_lock.lock().await;
        let mut data = self.load().await;
        data.opened_at_map
            .insert(tab.to_string(), Utc::now().timestamp_millis());
        self.persist(&data).await
    }

    async fn remove_tab_opened(&self, tab: TabId) -> Result<()> {
        let _io = self.io_lock.lock().await;
        let mut data = self.load().await;
        if data.opened_at_map.remove(&tab.to_string()).is_some() {
            self.persist(&data).await?;
        }
        Ok(())
    }
}

/// Reconcile the opened-time map against a fresh snapshot: record tabs seen
/// for the first time, drop entries for tabs that are gone. Returns
/// `(recorded, removed)` counts.
pub async fn reconcile_opened_at(
    store: &dyn OpenedAtStore,
    snapshot: &[Tab],
) -> Result<(usize, usize)> {
    let known = store.opened_at_map().await?;
    let live: HashSet<TabId> = snapshot.iter().map(|tab| tab.id).collect();

    let mut recorded = 0;
    for tab in snapshot {
        if !known.contains_key(&tab.id) {
            store.record_tab_opened(tab.id).await?;
            recorded += 1;
        }
    }

    let mut removed = 0;
    for id in known.keys() {
        if !live.contains(id) {
            store.remove_tab_opened(*id).await?;
            removed += 1;
        }
    }

    Ok((recorded, removed))
}
