//! JSON-file-backed ordered collection.
//!
//! One [`JsonStore`] exclusively owns one file (e.g. `admins.json`) and keeps an in-memory copy
//! behind its own mutex. Every mutation runs load-mutate-save while holding that mutex, so two
//! concurrent `add` calls on the same store cannot lose an update.
//!
//! Persistence is best-effort: read failures fall back to an empty sequence and write failures
//! are logged, never returned. The in-memory copy always reflects the intended state.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::error::StorageError;

/// Decodes one array element. A bare number that does not decode as `T` is retried as its
/// decimal string, so hand-edited id files like `[-1001, "-1002"]` load as string ids.
fn decode_item<T: DeserializeOwned>(value: Value) -> serde_json::Result<T> {
    match value {
        Value::Number(n) => serde_json::from_value(Value::Number(n.clone()))
            .or_else(|_| serde_json::from_value(Value::String(n.to_string()))),
        other => serde_json::from_value(other),
    }
}

/// Reads a JSON array from `path`. Any element that fails to decode fails the whole file.
pub async fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound(path.display().to_string()))
        }
        Err(e) => return Err(StorageError::Io(format!("{}: {}", path.display(), e))),
    };
    let parse_err = |e: serde_json::Error| StorageError::Parse(format!("{}: {}", path.display(), e));
    let values: Vec<Value> = serde_json::from_str(&raw).map_err(parse_err)?;
    values
        .into_iter()
        .map(decode_item)
        .collect::<serde_json::Result<Vec<T>>>()
        .map_err(parse_err)
}

/// Overwrites `path` with `items` as a pretty-printed JSON array, creating the parent directory if needed.
pub async fn write_file<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {}", parent.display(), e)))?;
    }
    let body = serde_json::to_string_pretty(items)
        .map_err(|e| StorageError::Parse(format!("{}: {}", path.display(), e)))?;
    tokio::fs::write(path, body)
        .await
        .map_err(|e| StorageError::Io(format!("{}: {}", path.display(), e)))
}

/// Applies the read fallback: missing or unreadable files yield an empty sequence.
async fn load_or_empty<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match read_file(path).await {
        Ok(items) => items,
        Err(StorageError::NotFound(_)) => {
            debug!(path = %path.display(), "Store file missing; starting empty");
            Vec::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Store file unreadable; using empty list");
            Vec::new()
        }
    }
}

/// Applies the write fallback: failures are logged and swallowed.
async fn save_or_log<T: Serialize>(path: &Path, items: &[T]) {
    if let Err(e) = write_file(path, items).await {
        error!(path = %path.display(), error = %e, "Failed to save store file");
    }
}

/// Persisted, insertion-ordered collection backed by one JSON file.
///
/// Use [`add`](Self::add) / [`remove`](Self::remove) for set semantics (admins, groups, users)
/// and [`append`](Self::append) / [`clear`](Self::clear) for logs (prayers, events).
#[derive(Debug)]
pub struct JsonStore<T> {
    path: PathBuf,
    items: Mutex<Vec<T>>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync,
{
    /// Opens the store, loading the current file contents (empty on missing/corrupt file).
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = load_or_empty(&path).await;
        debug!(path = %path.display(), count = items.len(), "Store opened");
        Self {
            path,
            items: Mutex::new(items),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the backing file. Returns an empty sequence if it is absent or fails to parse;
    /// the file itself is left untouched.
    pub async fn load(&self) -> Vec<T> {
        let _guard = self.items.lock().await;
        load_or_empty(&self.path).await
    }

    /// Replaces the contents with `items` and overwrites the backing file.
    pub async fn save(&self, items: Vec<T>) {
        let mut guard = self.items.lock().await;
        *guard = items;
        save_or_log(&self.path, &guard[..]).await;
    }

    /// Snapshot of the current contents, in insertion order.
    pub async fn all(&self) -> Vec<T> {
        self.items.lock().await.clone()
    }

    pub async fn contains(&self, item: &T) -> bool {
        self.items.lock().await.contains(item)
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    /// Appends `item` iff absent. Returns whether the store changed.
    pub async fn add(&self, item: T) -> bool {
        let mut guard = self.items.lock().await;
        if guard.contains(&item) {
            return false;
        }
        guard.push(item);
        save_or_log(&self.path, &guard[..]).await;
        true
    }

    /// Appends `item` unconditionally (duplicates allowed).
    pub async fn append(&self, item: T) {
        let mut guard = self.items.lock().await;
        guard.push(item);
        save_or_log(&self.path, &guard[..]).await;
    }

    /// Removes the occurrence of `item` if present. Returns whether the store changed.
    pub async fn remove(&self, item: &T) -> bool {
        let mut guard = self.items.lock().await;
        let Some(pos) = guard.iter().position(|x| x == item) else {
            return false;
        };
        guard.remove(pos);
        save_or_log(&self.path, &guard[..]).await;
        true
    }

    /// Replaces the contents with an empty sequence.
    pub async fn clear(&self) {
        let mut guard = self.items.lock().await;
        guard.clear();
        save_or_log(&self.path, &guard[..]).await;
    }
}
