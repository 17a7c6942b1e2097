//! Save/load key-value interface, with an in-memory store and a store that
//! mirrors its contents into a single JSON file.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, Result};

pub trait KeyValueStore {
    fn save(&mut self, key: &str, value: String) -> Result<()>;
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn remove(&mut self, key: &str) -> Result<bool>;
    fn keys(&self) -> Vec<String>;
}

fn check_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(GalleryError::storage(key, "key must not be empty"));
    }
    Ok(())
}

/// Serialises `value` as JSON and saves it under `key`.
pub fn save_json<S, V>(store: &mut S, key: &str, value: &V) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    V: Serialize,
{
    let encoded = serde_json::to_string(value)?;
    store.save(key, encoded)
}

pub fn load_json<S, V>(store: &S, key: &str) -> Result<Option<V>>
where
    S: KeyValueStore + ?Sized,
    V: DeserializeOwned,
{
    match store.load(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&mut self, key: &str, value: String) -> Result<()> {
        check_key(key)?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        check_key(key)?;
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// Keeps the whole map in memory and rewrites the file on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries: BTreeMap<String, String> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };
        debug!("opened {} with {} key(s)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        debug!("wrote {} key(s) to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn save(&mut self, key: &str, value: String) -> Result<()> {
        check_key(key)?;
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            // Keep memory in line with what is on disk
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        check_key(key)?;
        match self.entries.remove(key) {
            Some(old) => {
                if let Err(e) = self.flush() {
                    self.entries.insert(key.to_string(), old);
                    return Err(e);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
