//! Key-value persistence backends
//!
//! Persisted state is a handful of string-valued keys. `FileKv` maps
//! each key to a file in the state directory and uses atomic writes
//! (write to temp file, then rename) to prevent corruption. `MemoryKv`
//! backs tests and embedders that want nothing on disk.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::{StorageError, StorageResult};

/// String-keyed, string-valued persistent store
pub trait KvStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, overwriting any prior value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key` entirely; no-op if absent
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// File-backed store: one `<key>.json` file per key
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDirectory {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Path of the file backing `key`
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::Read { path, source })
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        atomic_write(&self.key_path(key), value.as_bytes())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|source| StorageError::Delete { path, source })?;
        }
        Ok(())
    }
}

/// In-memory store for tests and headless embedders
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // Temp file in the same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path).map_err(|source| StorageError::Write {
        path: temp_path.clone(),
        source,
    })?;

    file.write_all(data).map_err(|source| StorageError::Write {
        path: temp_path.clone(),
        source,
    })?;

    // Sync to disk before rename
    file.sync_all().map_err(|source| StorageError::Write {
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_kv_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let mut kv = FileKv::open(temp_dir.path()).unwrap();

        assert!(kv.get("state").unwrap().is_none());

        kv.set("state", "{\"molds\":[]}").unwrap();
        assert_eq!(kv.get("state").unwrap().unwrap(), "{\"molds\":[]}");

        // Overwrite replaces the prior value
        kv.set("state", "second").unwrap();
        assert_eq!(kv.get("state").unwrap().unwrap(), "second");
    }

    #[test]
    fn test_file_kv_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut kv = FileKv::open(temp_dir.path()).unwrap();

        kv.set("state", "value").unwrap();
        assert!(kv.key_path("state").exists());

        kv.remove("state").unwrap();
        assert!(!kv.key_path("state").exists());
        assert!(kv.get("state").unwrap().is_none());

        // Removing an absent key is fine
        kv.remove("state").unwrap();
    }

    #[test]
    fn test_file_kv_open_creates_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let kv = FileKv::open(&nested).unwrap();
        assert!(nested.exists());
        assert!(kv.get("anything").unwrap().is_none());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("out.json");

        atomic_write(&target, b"data").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "data");
        assert!(!target.with_extension("tmp").exists());
    }

    #[test]
    fn test_memory_kv() {
        let mut kv = MemoryKv::new();
        assert!(kv.get("k").unwrap().is_none());

        kv.set("k", "v").unwrap();
        assert_eq!(kv.get("k").unwrap().unwrap(), "v");

        kv.remove("k").unwrap();
        assert!(kv.get("k").unwrap().is_none());
    }
}
