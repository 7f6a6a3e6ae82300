//! Configuration management for the travel diary.
//!
//! The only setting is the location of the diary file. It is read from the
//! environment, with a default under the user's home directory, and can be
//! overridden on the command line.
//!
//! # Environment Variables
//!
//! - `TRAVEL_DIARY_FILE`: Path to the diary file (defaults to ~/Documents/travel-diary/diary.json)
//! - `HOME`: Used for building the default path

use crate::constants::{
    DEFAULT_DIARY_SUBPATH, ENV_VAR_DIARY_FILE, ENV_VAR_HOME, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Configuration for the travel diary.
///
/// # Examples
///
/// ```
/// use travel_diary::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     diary_file: PathBuf::from("/path/to/diary.json"),
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// File the diary is loaded from and saved to.
    pub diary_file: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("diary_file", &REDACTED_PLACEHOLDER)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Uses `TRAVEL_DIARY_FILE` if set, otherwise
    /// `$HOME/Documents/travel-diary/diary.json`. The path is expanded with
    /// `shellexpand`, so `~` and `$VAR` references are resolved.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the path cannot be expanded or is empty.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use travel_diary::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Diary file: {}", config.diary_file.display()),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let raw = env::var(ENV_VAR_DIARY_FILE).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DIARY_SUBPATH)
        });

        Self::from_path(&raw)
    }

    /// Builds a configuration from a raw path, expanding `~` and variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the path cannot be expanded or is empty.
    pub fn from_path(raw: &str) -> AppResult<Self> {
        let expanded = shellexpand::full(raw)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let diary_file = PathBuf::from(expanded.into_owned());
        if diary_file.as_os_str().is_empty() {
            return Err(AppError::Config("Diary file path is empty".to_string()));
        }

        debug!("Resolved diary file path");
        Ok(Config { diary_file })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Diary file path is empty"
    /// - "Diary file must be an absolute path"
    /// - "Diary file path points to a directory"
    ///
    /// # Examples
    ///
    /// ```
    /// use travel_diary::Config;
    /// use std::path::PathBuf;
    ///
    /// let relative = Config {
    ///     diary_file: PathBuf::from("diary.json"),
    /// };
    /// assert!(relative.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.diary_file.as_os_str().is_empty() {
            return Err(AppError::Config("Diary file path is empty".to_string()));
        }

        if !self.diary_file.is_absolute() {
            return Err(AppError::Config(
                "Diary file must be an absolute path".to_string(),
            ));
        }

        if self.diary_file.is_dir() {
            return Err(AppError::Config(
                "Diary file path points to a directory".to_string(),
            ));
        }

        Ok(())
    }
}
