//! Database configuration and connection parameters.
//!
//! This module provides configuration types for database connections,
//! including path resolution and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration for database connections.
///
/// This struct contains all parameters needed to open and configure
/// a database connection, including the database file path, timeout
/// settings, and access modes.
///
/// # Examples
///
/// ```
/// use roomer::database::DatabaseConfig;
/// use std::time::Duration;
///
/// // Create a configuration with default settings
/// let config = DatabaseConfig::new("/tmp/roomer.db");
///
/// // Customize the configuration
/// let config = DatabaseConfig::new("/tmp/roomer.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    ///
    /// # Examples
    ///
    /// ```
    /// use roomer::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/roomer.db");
    /// assert_eq!(config.path.to_str().unwrap(), "/tmp/roomer.db");
    /// ```
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    ///
    /// The busy timeout determines how long the database connection will
    /// wait when encountering a locked database before returning an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomer::database::DatabaseConfig;
    /// use std::time::Duration;
    ///
    /// let config = DatabaseConfig::new("/tmp/roomer.db")
    ///     .with_busy_timeout(Duration::from_secs(10));
    /// ```
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomer::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/roomer.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory for roomer.
///
/// The default directory is `~/.roomer` in the user's home directory.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use roomer::database::default_data_dir;
///
/// let data_dir = default_data_dir().unwrap();
/// println!("Data directory: {}", data_dir.display());
/// ```
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "Cannot determine home directory".into(),
    })?;
    Ok(home.join(".roomer"))
}

/// Resolves the database path using environment variables or defaults.
///
/// The resolution order is:
/// 1. `$ROOMER_DATA_DIR/roomer.db` if the `ROOMER_DATA_DIR` environment variable is set
/// 2. `~/.roomer/roomer.db` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `ROOMER_DATA_DIR` is not set.
///
/// # Examples
///
/// ```no_run
/// use roomer::database::resolve_database_path;
///
/// let db_path = resolve_database_path().unwrap();
/// println!("Database path: {}", db_path.display());
/// ```
pub fn resolve_database_path() -> Result<PathBuf> {
    if let Ok(data_dir) = std::env::var("ROOMER_DATA_DIR") {
        Ok(PathBuf::from(data_dir).join("roomer.db"))
    } else {
        Ok(default_data_dir()?.join("roomer.db"))
    }
}
