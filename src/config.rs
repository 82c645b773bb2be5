//! Configuration for the todo CLI.
//!
//! Loaded from --config, .todostore.yml, or ~/.config/todostore/todostore.yml

use crate::filter::SearchScope;
use crate::task::DEFAULT_NAME_ADVISORY_LEN;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const PROJECT_CONFIG: &str = ".todostore.yml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file.
    #[serde(rename = "db-path")]
    pub db_path: PathBuf,

    /// Columns matched by search.
    #[serde(rename = "search-scope")]
    pub search_scope: SearchScope,

    /// Names longer than this are accepted but logged.
    #[serde(rename = "name-advisory-len")]
    pub name_advisory_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            search_scope: SearchScope::default(),
            name_advisory_len: DEFAULT_NAME_ADVISORY_LEN,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .todostore.yml in current directory
    /// 3. ~/.config/todostore/todostore.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        Self::load_with(config_path, Path::new("."), dirs::config_dir().as_deref())
    }

    /// Fallback chain with the project directory and user config dir given explicitly.
    fn load_with(config_path: Option<&PathBuf>, project_dir: &Path, config_dir: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let candidates = std::iter::once(project_dir.join(PROJECT_CONFIG))
            .chain(config_dir.map(|dir| dir.join("todostore").join("todostore.yml")));

        for candidate in candidates {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => {
                    info!("Loaded config from {}", candidate.display());
                    return Ok(config);
                }
                Err(e) => {
                    warn!("Failed to load {}: {}", candidate.display(), e);
                }
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.db_path.as_os_str().is_empty() {
            eyre::bail!("db-path must not be empty");
        }
        if self.name_advisory_len == 0 {
            eyre::bail!("name-advisory-len must be > 0");
        }
        Ok(())
    }
}

/// `<data_local_dir>/todostore/todo.db`, or `./todo.db` when there is no data dir
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("todostore").join("todo.db"))
        .unwrap_or_else(|| PathBuf::from("todo.db"))
}
