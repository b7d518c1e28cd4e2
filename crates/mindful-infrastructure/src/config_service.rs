//! Configuration loading.
//!
//! Reads `config.toml` from the resolved config directory. A missing or
//! empty file yields the defaults.

use crate::paths::MindfulPaths;
use mindful_core::config::MindfulConfig;
use mindful_core::error::Result;
use tokio::fs;

#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: MindfulPaths,
}

impl ConfigService {
    pub fn new(paths: MindfulPaths) -> Self {
        Self { paths }
    }

    /// Loads and validates the configuration.
    pub async fn load(&self) -> Result<MindfulConfig> {
        let path = self.paths.config_file();
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(MindfulConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(MindfulConfig::default());
        }

        let config = MindfulConfig::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(MindfulPaths::at(temp_dir.path()));
        assert_eq!(service.load().await.unwrap(), MindfulConfig::default());
    }

    #[tokio::test]
    async fn test_loads_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "[dashboard]\nstep_goal = 7500\nseed_sample_data = false\n",
        )
        .unwrap();

        let config = ConfigService::new(MindfulPaths::at(temp_dir.path()))
            .load()
            .await
            .unwrap();
        assert_eq!(config.dashboard.step_goal, 7500);
        assert!(!config.dashboard.seed_sample_data);
    }

    #[tokio::test]
    async fn test_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "[coach]\ntimeout_secs = 0\n").unwrap();

        let err = ConfigService::new(MindfulPaths::at(temp_dir.path()))
            .load()
            .await
            .unwrap_err();
        assert!(err.is_config());
    }
}
