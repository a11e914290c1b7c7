use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use tempfile::NamedTempFile;
use tick_core::storage::{KeyValueStore, StoreError};
use tracing::instrument;

/// File-backed store implementing the shared `KeyValueStore` contract.
/// Each key maps to one file under the root directory; writes replace the
/// whole file atomically via a temp file in the same directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(sanitize_key(key))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip_all, fields(key))]
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(storage_err)?;

        let path = self.path_for(key);
        write_value(&path, value)
    }

    #[instrument(skip_all, fields(key))]
    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(key);
        fs::read(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound {
                    key: key.to_string(),
                }
            } else {
                storage_err(err)
            }
        })
    }

    #[instrument(skip_all, fields(key))]
    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_err(err)),
        }
    }
}

fn write_value(path: &Path, value: &[u8]) -> Result<(), StoreError> {
    let parent = path.parent().ok_or_else(|| StoreError::Storage {
        reason: "invalid storage path".to_string(),
    })?;
    fs::create_dir_all(parent).map_err(storage_err)?;

    // Temp file lives in the target directory so the final rename never
    // crosses a filesystem boundary.
    let tmp = NamedTempFile::new_in(parent).map_err(storage_err)?;
    fs::write(tmp.path(), value).map_err(storage_err)?;
    tmp.persist(path).map_err(|e| storage_err(e.error))?;
    Ok(())
}

fn sanitize_key(key: &str) -> String {
    URL_SAFE_NO_PAD.encode(key)
}

fn storage_err<E: ToString>(err: E) -> StoreError {
    StoreError::Storage {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());

        store.put("tasks", b"[1,2,3]").expect("put");
        let value = store.get("tasks").expect("get");
        assert_eq!(value, b"[1,2,3]");
    }

    #[test]
    fn put_overwrites_prior_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());

        store.put("tasks", b"old").expect("put");
        store.put("tasks", b"new").expect("put");
        assert_eq!(store.get("tasks").expect("get"), b"new");
    }

    #[test]
    fn missing_key_maps_to_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());

        let err = store.get("absent").expect_err("should be missing");
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());

        store.put("k", b"v").expect("put");
        store.delete("k").expect("delete");
        store.delete("k").expect("delete again");

        let err = store.get("k").expect_err("should be missing");
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn path_hostile_keys_are_stored_safely() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());

        let key = "nested/key:with spaces";
        store.put(key, b"v").expect("put");
        assert_eq!(store.get(key).expect("get"), b"v");

        // The encoded name stays inside the root directory.
        let entries: Vec<_> = fs::read_dir(dir.path())
            .expect("read_dir")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(entries.len(), 1);
    }
}
