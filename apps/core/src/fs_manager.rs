use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment variable that relocates the whole data tree.
const DATA_DIR_ENV: &str = "CAREBOT_DATA_DIR";

pub struct PortablePathManager;

impl PortablePathManager {
    /// Directory holding the executable; falls back to the working directory.
    pub fn root_dir() -> PathBuf {
        match std::env::current_exe() {
            Ok(mut path) => {
                path.pop();
                path
            }
            Err(e) => {
                warn!(
                    "Failed to get current exe path: {}. Falling back to current_dir.",
                    e
                );
                std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
            }
        }
    }

    /// Main data directory (`./data`, or `$CAREBOT_DATA_DIR`).
    pub fn data_dir() -> PathBuf {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => Self::root_dir().join("data"),
        }
    }

    /// Database directory (`./data/db`).
    pub fn db_dir() -> PathBuf {
        Self::data_dir().join("db")
    }

    /// Model cache directory (`./data/models`), used by the embedding backend.
    pub fn models_dir() -> PathBuf {
        Self::data_dir().join("models")
    }

    /// Default location of the emotion diary database.
    pub fn default_db_path() -> PathBuf {
        Self::db_dir().join("carebot.sqlite")
    }

    /// Creates the data, db and models directories if they do not exist.
    pub fn init() -> Result<(), std::io::Error> {
        for dir in [Self::data_dir(), Self::db_dir(), Self::models_dir()] {
            if !dir.exists() {
                info!("Creating directory: {:?}", dir);
                fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
