use std::path::PathBuf;

use clap::Parser;
use monotodo_store::StoreConfig;

pub const LOG_FILE_NAME: &str = "monotodo.log";

#[derive(Debug, Parser)]
#[command(name = "monotodo", about = "Terminal task list", version)]
pub struct Config {
    /// Directory holding the task list and theme preference
    #[arg(long, env = "MONOTODO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log file (defaults to monotodo.log in the data directory)
    #[arg(long, env = "MONOTODO_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Keep tasks in memory only; nothing is written to disk.
    /// Logging is off unless --log-file is given.
    #[arg(long)]
    pub ephemeral: bool,
}

impl Config {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            local_data_dir: self.data_dir.clone(),
        }
    }

    /// Where logs go, or `None` when logging is disabled.
    pub fn log_path(&self) -> Option<PathBuf> {
        match (&self.log_file, self.ephemeral) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => None,
            (None, false) => Some(self.store_config().data_dir().join(LOG_FILE_NAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_defaults_into_data_dir() {
        let config = Config::parse_from(["monotodo", "--data-dir", "/tmp/todo"]);
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/todo/monotodo.log")));
    }

    #[test]
    fn ephemeral_disables_default_log() {
        let config = Config::parse_from(["monotodo", "--ephemeral"]);
        assert!(config.ephemeral);
        assert_eq!(config.log_path(), None);

        let config = Config::parse_from(["monotodo", "--ephemeral", "--log-file", "/tmp/x.log"]);
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/x.log")));
    }

    #[test]
    fn store_config_carries_data_dir() {
        let config = Config::parse_from(["monotodo", "--data-dir", "/srv/tasks"]);
        assert_eq!(
            config.store_config().local_data_dir,
            Some(PathBuf::from("/srv/tasks"))
        );
    }
}
