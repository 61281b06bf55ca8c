//! Path resolution for streaks configuration and data files.
//!
//! All streaks data is stored in `~/.streaks/` unless `STREAKS_HOME` points
//! somewhere else:
//! - `config.yaml` - Main configuration file
//! - `streaks.db` - SQLite database with habits and completions

use std::path::PathBuf;

use crate::error::StreaksError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "STREAKS_HOME";

/// Paths to streaks configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.streaks/`
    pub root: PathBuf,
    /// Config file: `~/.streaks/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.streaks/streaks.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `STREAKS_HOME`, falling back to `$HOME/.streaks`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, StreaksError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            StreaksError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".streaks")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("streaks.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StreaksError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                StreaksError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-streaks");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("streaks.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("streaks"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
