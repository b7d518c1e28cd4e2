//! Unified path management for mindful configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/mindful/           # Config directory ($MINDFUL_HOME overrides)
//! ├── config.toml              # Application configuration
//! └── store/                   # Key-value store, one JSON file per key
//!     ├── moodEntries.json
//!     ├── meditationSessions.json
//!     └── ...
//! ```

use mindful_core::config::MindfulConfig;
use mindful_core::error::{MindfulError, Result};
use std::path::{Path, PathBuf};

/// Environment variable that relocates the whole config directory.
pub const HOME_ENV: &str = "MINDFUL_HOME";

const APP_DIR: &str = "mindful";
const CONFIG_FILE: &str = "config.toml";
const STORE_DIR: &str = "store";

/// Resolved locations for one mindful installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MindfulPaths {
    config_dir: PathBuf,
}

impl MindfulPaths {
    /// Resolves the config directory.
    ///
    /// Priority: explicit `home` argument, then `$MINDFUL_HOME`, then the
    /// platform config directory (e.g. `~/.config/mindful`).
    pub fn new(home: Option<&Path>) -> Result<Self> {
        if let Some(home) = home {
            return Ok(Self::at(home));
        }
        if let Some(env_home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(PathBuf::from(env_home)));
        }
        let base = dirs::config_dir()
            .ok_or_else(|| MindfulError::config("Cannot find config directory"))?;
        Ok(Self::at(base.join(APP_DIR)))
    }

    /// Paths rooted at an explicit directory.
    pub fn at(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Store directory: `[storage] data_dir` if set, else `<config>/store`.
    ///
    /// A relative `data_dir` is taken relative to the config directory.
    pub fn data_dir(&self, config: &MindfulConfig) -> PathBuf {
        match &config.storage.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.config_dir.join(dir),
            None => self.config_dir.join(STORE_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_home_wins() {
        let paths = MindfulPaths::new(Some(Path::new("/tmp/mindful-home"))).unwrap();
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/mindful-home/config.toml"));
    }

    #[test]
    fn test_data_dir_resolution() {
        let paths = MindfulPaths::at("/srv/mindful");
        let mut config = MindfulConfig::default();
        assert_eq!(paths.data_dir(&config), PathBuf::from("/srv/mindful/store"));

        config.storage.data_dir = Some(PathBuf::from("records"));
        assert_eq!(paths.data_dir(&config), PathBuf::from("/srv/mindful/records"));

        config.storage.data_dir = Some(PathBuf::from("/var/lib/mindful"));
        assert_eq!(paths.data_dir(&config), PathBuf::from("/var/lib/mindful"));
    }
}
