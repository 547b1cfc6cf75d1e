use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TasklistError;
use crate::models::ViewQuery;

/// Data directory used when neither `--data-dir` nor `TASKLIST_DIR` is set.
pub const DEFAULT_DATA_DIR: &str = ".tasklist";
pub const CONFIG_FILE: &str = "config.json";

/// Settings kept next to the database.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default search, filters and sort for `list`.
    pub view: ViewQuery,
}

impl Config {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Read the config. A missing file yields the defaults.
    pub fn load(data_dir: &Path) -> Result<Self, TasklistError> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| TasklistError::config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| TasklistError::config(format!("{}: {e}", path.display())))
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), TasklistError> {
        let path = Self::path(data_dir);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TasklistError::config(e.to_string()))?;
        fs::write(&path, content)
            .map_err(|e| TasklistError::config(format!("{}: {e}", path.display())))
    }
}
