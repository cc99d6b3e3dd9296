//! Configuration for the todo CLI.
//!
//! The store file is chosen, in order of precedence, by:
//! 1. the `--file` option (or the `TODO_FILE` environment variable),
//! 2. the `file` entry of an optional `.todo.yaml` in the working directory,
//! 3. [`DEFAULT_TODO_FILE`] in the working directory.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file path relative to the working directory.
pub const CONFIG_FILE_PATH: &str = ".todo.yaml";

/// Store file used when nothing else is configured.
pub const DEFAULT_TODO_FILE: &str = "my_todos.json";

/// Environment variable that selects the store file.
pub const TODO_FILE_ENV: &str = "TODO_FILE";

/// Settings read from the config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Store file. Relative paths are resolved against the config's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load config from a base directory, returning None if there is no config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = Self::config_path(base_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        if content.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Save config to a base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    #[cfg(test)]
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(Self::config_path(base_dir), content)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    #[must_use]
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }
}

/// Resolve which store file to use.
///
/// `explicit` is the path given on the command line, if any. Relative paths
/// are resolved against `base_dir`.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn resolve_store_path(explicit: Option<&Path>, base_dir: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(base_dir.join(path));
    }

    let configured = Config::load_from(base_dir)?.and_then(|config| config.file);
    Ok(base_dir.join(configured.unwrap_or_else(|| PathBuf::from(DEFAULT_TODO_FILE))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load_from(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = Config { file: Some(PathBuf::from("work.json")) };

        config.save_to(dir.path()).unwrap();

        assert_eq!(Config::load_from(dir.path()).unwrap(), Some(config));
    }

    #[test]
    fn test_empty_config_file_is_default() {
        let dir = TempDir::new().unwrap();
        std::fs::write(Config::config_path(dir.path()), "\n").unwrap();
        assert_eq!(Config::load_from(dir.path()).unwrap(), Some(Config::default()));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(Config::config_path(dir.path()), "file: [unclosed").unwrap();
        assert!(Config::load_from(dir.path()).is_err());
    }

    #[test]
    fn test_resolve_defaults_to_default_file() {
        let dir = TempDir::new().unwrap();
        let path = resolve_store_path(None, dir.path()).unwrap();
        assert_eq!(path, dir.path().join(DEFAULT_TODO_FILE));
    }

    #[test]
    fn test_resolve_uses_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(Config::config_path(dir.path()), "file: lists/home.json\n").unwrap();

        let path = resolve_store_path(None, dir.path()).unwrap();

        assert_eq!(path, dir.path().join("lists/home.json"));
    }

    #[test]
    fn test_resolve_explicit_wins_over_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(Config::config_path(dir.path()), "file: home.json\n").unwrap();

        let path = resolve_store_path(Some(Path::new("BossTodos.json")), dir.path()).unwrap();

        assert_eq!(path, dir.path().join("BossTodos.json"));
    }

    #[test]
    fn test_resolve_keeps_absolute_paths() {
        let dir = TempDir::new().unwrap();
        let absolute = dir.path().join("elsewhere.json");
        let path = resolve_store_path(Some(&absolute), Path::new("/unused")).unwrap();
        assert_eq!(path, absolute);
    }

    #[test]
    fn test_resolve_explicit_ignores_broken_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(Config::config_path(dir.path()), "file: [unclosed").unwrap();
        assert!(resolve_store_path(Some(Path::new("a.json")), dir.path()).is_ok());
        assert!(resolve_store_path(None, dir.path()).is_err());
    }
}
