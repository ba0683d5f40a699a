//! Runtime configuration loaded from `sheetdiff.json`

use crate::error::{Result, SheetDiffError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "sheetdiff.json";

pub const DEFAULT_DOCUMENTS_DIR: &str = "documents";

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding `<id>.json` document snapshots
    pub documents_dir: PathBuf,
    /// Size of the diff worker pool; 0 uses one thread per core
    pub worker_threads: usize,
    /// Address the HTTP service listens on
    pub bind: String,
    /// Stop after the structural report when sheet names differ
    pub halt_on_mismatch: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            documents_dir: PathBuf::from(DEFAULT_DOCUMENTS_DIR),
            worker_threads: 0,
            bind: DEFAULT_BIND.to_string(),
            halt_on_mismatch: false,
        }
    }
}

impl Config {
    /// Load from `path`, or from `./sheetdiff.json` if present, or fall back to defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SheetDiffError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| SheetDiffError::config(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
