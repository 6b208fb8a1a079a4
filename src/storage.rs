// Key-value blob storage backends

use crate::error::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Abstraction over "get/set a string blob by key" persistent storage
///
/// The store reads and writes the entire collection as one blob under one
/// key; backends only need whole-value semantics.
pub trait BlobStorage {
    /// Read the blob stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the blob stored under `key`, if present
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-backed storage: one file per key under a store directory
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Open or create storage rooted at the given path
    ///
    /// Blobs live in a `.issuestore` subdirectory of the given path; key `k`
    /// maps to the file `k.json`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().join(".issuestore");
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Get the base path of this storage
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl BlobStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key);
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(&path)
            .map_err(map_write_error)?;

        // Acquire exclusive lock before replacing the blob
        file.lock_exclusive()?;
        file.set_len(0)?;
        file.write_all(value.as_bytes()).map_err(map_write_error)?;
        file.sync_all().map_err(map_write_error)?;

        debug!(key, bytes = value.len(), "wrote blob");

        // Lock is automatically released when file is dropped
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.blob_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn map_write_error(e: std::io::Error) -> Error {
    match e.kind() {
        std::io::ErrorKind::StorageFull | std::io::ErrorKind::QuotaExceeded => Error::QuotaExceeded,
        _ => Error::Io(e),
    }
}

/// In-memory storage for tests and ephemeral use
///
/// The capacity-limited form rejects writes that would push total stored
/// bytes past the cap, modeling quota exhaustion.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: HashMap<String, String>,
    capacity: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes once stored bytes would exceed `bytes`
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            blobs: HashMap::new(),
            capacity: Some(bytes),
        }
    }
}

impl BlobStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(cap) = self.capacity {
            let others: usize = self
                .blobs
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > cap {
                return Err(Error::QuotaExceeded);
            }
        }
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_creates_directory() {
        let temp = TempDir::new().unwrap();

        let _storage = FileStorage::open(temp.path()).unwrap();
        assert!(temp.path().join(".issuestore").exists());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::open(temp.path()).unwrap();

        assert!(storage.get("issues").unwrap().is_none());

        storage.set("issues", "[1,2,3]").unwrap();
        assert_eq!(storage.get("issues").unwrap().unwrap(), "[1,2,3]");

        // Replacing with a shorter value must not leave stale bytes behind
        storage.set("issues", "[]").unwrap();
        assert_eq!(storage.get("issues").unwrap().unwrap(), "[]");
    }

    #[test]
    fn test_file_storage_remove() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::open(temp.path()).unwrap();

        storage.set("issues", "[]").unwrap();
        storage.remove("issues").unwrap();
        assert!(storage.get("issues").unwrap().is_none());

        // Removing an absent key is fine
        storage.remove("issues").unwrap();
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();

        assert!(storage.get("issues").unwrap().is_none());
        storage.set("issues", "[]").unwrap();
        assert_eq!(storage.get("issues").unwrap().unwrap(), "[]");
        storage.remove("issues").unwrap();
        assert!(storage.get("issues").unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_quota() {
        let mut storage = MemoryStorage::with_capacity(16);

        storage.set("k", "0123456789").unwrap();

        let err = storage.set("k", "0123456789abcdef").unwrap_err();
        assert!(matches!(err, Error::QuotaExceeded));

        // Prior value survives a rejected write
        assert_eq!(storage.get("k").unwrap().unwrap(), "0123456789");
    }
}
