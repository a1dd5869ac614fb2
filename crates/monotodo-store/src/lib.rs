mod local;
mod memory;
mod persist;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use persist::{TaskPersistence, Theme, TASKS_KEY, THEME_KEY};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Internal(String),
}

/// A synchronous string key-value store.
pub trait KeyValueStore {
    /// Write (create or overwrite) a value.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read a value. Returns `StoreError::NotFound` if absent.
    fn get(&self, key: &str) -> Result<String, StoreError>;

    /// Read a value, returning `None` if it does not exist.
    fn get_opt(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete a value. No-op if absent.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get_opt(key)?.is_some())
    }
}

// -- Configuration --

/// Where the local store keeps its files.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Base directory. When `None`, use the platform data directory.
    pub local_data_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Build from `MONOTODO_DATA_DIR`, if set and non-empty.
    pub fn from_env() -> Self {
        Self {
            local_data_dir: std::env::var_os("MONOTODO_DATA_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.local_data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// `$XDG_DATA_HOME/monotodo`, else `$HOME/.local/share/monotodo`, else `./monotodo`.
pub fn default_data_dir() -> PathBuf {
    let base = if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("monotodo")
}

// -- Factory --

/// Create the file-backed store described by `config`.
pub fn create_store(config: &StoreConfig) -> Result<Box<dyn KeyValueStore>, StoreError> {
    let store = LocalStore::new(config);
    std::fs::create_dir_all(store.base_dir())?;
    tracing::debug!("local store at {}", store.base_dir().display());
    Ok(Box::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_store_makes_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested/data");
        let config = StoreConfig {
            local_data_dir: Some(dir.clone()),
        };
        let store = create_store(&config).unwrap();
        assert!(dir.is_dir());
        store.put("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), "v");
    }

    #[test]
    fn data_dir_prefers_explicit_dir() {
        let config = StoreConfig {
            local_data_dir: Some(PathBuf::from("/tmp/explicit")),
        };
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/explicit"));
    }

    #[test]
    fn default_data_dir_ends_with_app_name() {
        assert!(default_data_dir().ends_with("monotodo"));
    }

    // Mutates a global env var; kept in one test to avoid races with parallel tests.
    #[test]
    fn store_config_from_env_scenarios() {
        std::env::remove_var("MONOTODO_DATA_DIR");
        assert!(StoreConfig::from_env().local_data_dir.is_none());

        std::env::set_var("MONOTODO_DATA_DIR", "");
        assert!(StoreConfig::from_env().local_data_dir.is_none());

        std::env::set_var("MONOTODO_DATA_DIR", "/tmp/monotodo-test");
        assert_eq!(
            StoreConfig::from_env().local_data_dir,
            Some(PathBuf::from("/tmp/monotodo-test"))
        );

        std::env::remove_var("MONOTODO_DATA_DIR");
    }
}
