//! Configuration loading for the roomer system.
//!
//! Configuration is read from a YAML file. The file location is resolved
//! from the `ROOMER_CONFIG` environment variable, falling back to
//! `config.yaml` in the data directory; a missing file yields the
//! defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::{default_data_dir, resolve_database_path, DatabaseConfig};
use crate::engine::DEFAULT_RESCHEDULE_WINDOW_DAYS;
use crate::error::Result;

/// Complete configuration structure.
///
/// All fields are optional; unset fields fall back to built-in defaults
/// at the point of use.
///
/// # Examples
///
/// ```
/// use roomer::Config;
///
/// let config: Config = serde_yaml::from_str(
///     "database_path: /var/lib/roomer/roomer.db\nreschedule_window_days: 14\n",
/// ).unwrap();
/// assert_eq!(config.reschedule_window_days, Some(14));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the bookings database file.
    pub database_path: Option<PathBuf>,

    /// Length of the reschedule protection window, in days.
    pub reschedule_window_days: Option<i64>,

    /// Busy timeout for database lock contention, in milliseconds.
    pub busy_timeout_ms: Option<u64>,
}

impl Config {
    /// Loads the configuration from the resolved location.
    ///
    /// The resolution order is:
    /// 1. The file named by `ROOMER_CONFIG`, if set
    /// 2. `config.yaml` in the data directory
    /// 3. Built-in defaults if neither file exists
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be
    /// read or parsed.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var("ROOMER_CONFIG") {
            return Self::load_from(Path::new(&path));
        }

        let default_path = default_data_dir()?.join("config.yaml");
        if default_path.exists() {
            Self::load_from(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Resolves the database path, deferring to the environment when
    /// the configuration does not pin one.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is configured and the default cannot
    /// be determined.
    pub fn resolved_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => resolve_database_path(),
        }
    }

    /// Returns the reschedule protection window length in days.
    #[must_use]
    pub fn reschedule_window_days(&self) -> i64 {
        self.reschedule_window_days
            .unwrap_or(DEFAULT_RESCHEDULE_WINDOW_DAYS)
    }

    /// Builds a database configuration from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database path cannot be resolved.
    pub fn database_config(&self) -> Result<DatabaseConfig> {
        let mut config = DatabaseConfig::new(self.resolved_database_path()?);
        if let Some(ms) = self.busy_timeout_ms {
            config = config.with_busy_timeout(Duration::from_millis(ms));
        }
        Ok(config)
    }
}
