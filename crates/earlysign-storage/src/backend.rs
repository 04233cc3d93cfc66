use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use earlysign_core::storage_keys;

use crate::error::StorageError;

/// A local key-value medium holding opaque byte values.
///
/// `put` must replace the value as a whole: a reader sees either the old
/// bytes or the new ones, never a mix.
pub trait SlotBackend: Send + Sync {
    /// Read the bytes under `key`. `Ok(None)` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the bytes under `key`.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}

impl<B: SlotBackend + ?Sized> SlotBackend for &B {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        (**self).put(key, value)
    }
}

/// In-process map. Used in tests and anywhere persistence across runs is
/// not wanted.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: Mutex<HashMap<String, Vec<u8>>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any write that would push the total stored bytes past `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            slots: Mutex::default(),
            quota: Some(bytes),
        }
    }

    /// Write raw bytes, bypassing any quota. Lets tests plant foreign data.
    pub fn insert_raw(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.into());
    }

    /// Drop every slot, as when the medium is wiped from outside.
    pub fn clear(&self) {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl SlotBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let slots = self.slots.lock().map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(slots.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().map_err(|e| StorageError::Persistence {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(quota) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let needed = others + value.len();
            if needed > quota {
                return Err(StorageError::Persistence {
                    key: key.to_string(),
                    reason: format!("quota exceeded ({needed} of {quota} bytes)"),
                });
            }
        }

        slots.insert(key.to_string(), value);
        Ok(())
    }
}

/// One file per key inside a directory.
///
/// Writes go to a temp file which is then renamed over the target, so a
/// crash mid-write leaves the previous value in place.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(storage_keys::file_name(key))
    }
}

impl SlotBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "slot read");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                reason: format!("{}: {e}", path.display()),
            }),
        }
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let persistence = |e: std::io::Error| StorageError::Persistence {
            key: key.to_string(),
            reason: format!("{}: {e}", path.display()),
        };

        std::fs::create_dir_all(&self.dir).map_err(persistence)?;

        let tmp_path = path.with_extension("json.tmp");
        if let Err(e) = write_then_rename(&tmp_path, &path, &value) {
            // The temp file may exist even though the write failed.
            let _ = std::fs::remove_file(&tmp_path);
            return Err(persistence(e));
        }

        tracing::debug!(path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }
}

fn write_then_rename(tmp_path: &Path, path: &Path, value: &[u8]) -> std::io::Result<()> {
    std::fs::write(tmp_path, value)?;

    // Owner-only before the file becomes visible under its real name.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(tmp_path, path)
}
