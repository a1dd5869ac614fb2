use std::path::PathBuf;

use crate::{KeyValueStore, StoreConfig, StoreError};

/// One file per key under a base directory.
pub struct LocalStore {
    base_dir: PathBuf,
}

impl LocalStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            base_dir: config.data_dir(),
        }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn resolve(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

impl KeyValueStore for LocalStore {
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.resolve(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Internal(format!("mkdir: {e}")))?;
        }
        std::fs::write(&path, value)
            .map_err(|e| StoreError::Internal(format!("write {}: {e}", path.display())))
    }

    fn get(&self, key: &str) -> Result<String, StoreError> {
        let path = self.resolve(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(StoreError::Internal(format!(
                "read {}: {e}",
                path.display()
            ))),
        }
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.resolve(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Internal(format!(
                "delete {}: {e}",
                path.display()
            ))),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.resolve(key);
        path.try_exists()
            .map_err(|e| StoreError::Internal(format!("exists {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(dir: &std::path::Path) -> LocalStore {
        LocalStore::new(&StoreConfig {
            local_data_dir: Some(dir.to_path_buf()),
        })
    }

    #[test]
    fn put_then_get_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        store.put("monochrome_todo_v1", "[]").unwrap();
        assert_eq!(store.get("monochrome_todo_v1").unwrap(), "[]");
    }

    #[test]
    fn get_missing_returns_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        let err = store.get("nonexistent").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(store.get_opt("nonexistent").unwrap().is_none());
    }

    #[test]
    fn put_overwrites_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        store.put("key", "first").unwrap();
        store.put("key", "second").unwrap();
        assert_eq!(store.get("key").unwrap(), "second");
    }

    #[test]
    fn put_creates_missing_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(&tmp.path().join("not/yet"));

        store.put("key", "v").unwrap();
        assert!(store.exists("key").unwrap());
    }

    #[test]
    fn delete_removes_value_and_tolerates_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        store.put("key", "data").unwrap();
        assert!(store.exists("key").unwrap());
        store.delete("key").unwrap();
        assert!(!store.exists("key").unwrap());
        store.delete("key").unwrap();
    }

    #[test]
    fn unicode_content_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        let content = r#"[{"title":"Café ☕ 日本語"}]"#;
        store.put("key", content).unwrap();
        assert_eq!(store.get("key").unwrap(), content);
    }
}
