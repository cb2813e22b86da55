use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{validate_key, KeyValueStore, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredValue {
    pub value: String,
    pub stored_at: DateTime<Utc>,
}

impl StoredValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            stored_at: Utc::now(),
        }
    }
}

/// Store that keeps each key in `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn item_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Read the value together with when it was written
    pub fn load(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)?;
        let stored: StoredValue = serde_json::from_str(&contents)?;
        Ok(Some(stored))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load(key)?.map(|stored| stored.value))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.item_path(key)?;
        let contents = serde_json::to_string_pretty(&StoredValue::new(value))?;
        std::fs::write(&path, contents)?;
        debug!(?path, "Stored value");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let path = self.item_path(key)?;
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
