//! String key-value storage the repository persists its collections into.
//!
//! [`KeyValueStore`] mirrors browser local storage: whole string values
//! addressed by string keys. [`FileStore`] keeps one file per key on disk,
//! [`InMemoryStore`] keeps everything in a map for tests.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::gallery_error::{GalleryError, Result};

pub const ALBUMS_KEY: &str = "photoGalleryAlbums";
pub const PHOTOS_KEY: &str = "photoGalleryPhotos";

pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing was stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Returns whether the key existed.
    fn remove(&self, key: &str) -> Result<bool>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|e| {
            GalleryError::Storage(format!("lock poisoned: {}", e))
        })?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|e| {
            GalleryError::Storage(format!("lock poisoned: {}", e))
        })?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().map_err(|e| {
            GalleryError::Storage(format!("lock poisoned: {}", e))
        })?;
        Ok(entries.remove(key).is_some())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the store directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "opened file store");
        Ok(FileStore { dir })
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(|c: char| c == '/' || c == '\\') || key.starts_with('.') {
            return Err(GalleryError::Storage(format!("invalid key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.entry_path(key)?) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::trace!(key, bytes = value.len(), "stored entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        match fs::remove_file(self.entry_path(key)?) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("photoGalleryAlbums", "[]").unwrap();
        assert_eq!(store.get("photoGalleryAlbums").unwrap().as_deref(), Some("[]"));

        store.set("photoGalleryAlbums", "[1]").unwrap();
        assert_eq!(store.get("photoGalleryAlbums").unwrap().as_deref(), Some("[1]"));

        assert!(store.remove("photoGalleryAlbums").unwrap());
        assert!(!store.remove("photoGalleryAlbums").unwrap());
        assert_eq!(store.get("photoGalleryAlbums").unwrap(), None);
    }

    #[test]
    fn in_memory_store_behaves_like_local_storage() {
        exercise(&InMemoryStore::new());
    }

    #[test]
    fn file_store_behaves_like_local_storage() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&FileStore::open(dir.path()).unwrap());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::open(dir.path()).unwrap().set(PHOTOS_KEY, "[]").unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get(PHOTOS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("photoGalleryPhotos.json").exists());
        assert!(!dir.path().join("photoGalleryPhotos.json.tmp").exists());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(store.set("../escape", "x"), Err(GalleryError::Storage(_))));
        assert!(matches!(store.get(""), Err(GalleryError::Storage(_))));
    }
}
