use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use crate::errors::ServiceError;

/// String key/value store persisted to a JSON file.
///
/// Operations are synchronous so that sign-out can clear state without
/// awaiting. An in-memory variant skips persistence entirely.
pub struct LocalStore {
    inner: RwLock<HashMap<String, String>>,
    file_path: Option<PathBuf>,
}

impl LocalStore {
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(HashMap::new()), file_path: None })
    }

    /// Open the store at `path`, creating the file with an empty map if missing.
    /// A corrupt file is treated as empty.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ServiceError::Storage(e.to_string()))?;
            }
        }

        let map: HashMap<String, String> = match std::fs::read(&file_path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "local store unreadable; starting empty");
                HashMap::new()
            }),
            Err(_) => {
                let empty = HashMap::new();
                write_map(&file_path, &empty)?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path: Some(file_path) }))
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    /// Remove a key and persist; returns whether it existed.
    pub fn remove_item(&self, key: &str) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let existed = map.remove(key).is_some();
        if existed {
            self.save(&map)?;
        }
        Ok(existed)
    }

    fn save(&self, map: &HashMap<String, String>) -> Result<(), ServiceError> {
        match &self.file_path {
            Some(path) => write_map(path, map),
            None => Ok(()),
        }
    }
}

fn write_map(path: &PathBuf, map: &HashMap<String, String>) -> Result<(), ServiceError> {
    let data = serde_json::to_vec(map).map_err(|e| ServiceError::Storage(e.to_string()))?;
    std::fs::write(path, data).map_err(|e| ServiceError::Storage(e.to_string()))
}
