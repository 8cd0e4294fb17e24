use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Result, TelemetryError};

/// String key/value storage owned by the host.
pub trait StorageService {
    fn get(&self, key: &str) -> Option<String>;
    fn store(&self, key: &str, value: &str) -> Result<()>;
}

/// Volatile storage, one map per process.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: RefCell<BTreeMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RefCell::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl StorageService for InMemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage persisted as one pretty-printed JSON object. Every write flushes
/// the whole map.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: RefCell::new(BTreeMap::new()),
        }
    }

    /// Open `path`, reading existing entries if the file is there.
    pub fn open(path: PathBuf) -> Result<Self> {
        let storage = Self::new(path);
        storage.load()?;
        Ok(storage)
    }

    pub fn load(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let content = fs::read_to_string(&self.path)?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| TelemetryError::Serialization(e.to_string()))?;
        debug!(path = %self.path.display(), entries = entries.len(), "loaded storage");
        *self.entries.borrow_mut() = entries;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&*self.entries.borrow())
            .map_err(|e| TelemetryError::Serialization(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl StorageService for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.save()
    }
}
