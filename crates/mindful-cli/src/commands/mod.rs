pub mod coach;
pub mod dashboard;
pub mod journal;
pub mod record;
pub mod therapy;

use anyhow::{Context, Result};
use mindful_application::{CoachService, DashboardService, DashboardSettings};
use mindful_core::clock::SystemClock;
use mindful_core::config::MindfulConfig;
use mindful_infrastructure::{ConfigService, HttpCoachClient, JsonFileStore, MindfulPaths};
use std::path::Path;
use std::sync::Arc;

/// Services wired from the resolved config directory.
pub struct AppContext {
    pub config: MindfulConfig,
    pub dashboard: Arc<DashboardService>,
}

impl AppContext {
    pub async fn load(home: Option<&Path>) -> Result<Self> {
        let paths = MindfulPaths::new(home)?;
        let config = ConfigService::new(paths.clone())
            .load()
            .await
            .with_context(|| format!("Failed to load {}", paths.config_file().display()))?;

        let data_dir = paths.data_dir(&config);
        tracing::debug!(config_dir = %paths.config_dir().display(), data_dir = %data_dir.display(), "resolved paths");

        let settings = DashboardSettings::from_config(&config)?;
        let dashboard = Arc::new(DashboardService::new(
            Arc::new(JsonFileStore::new(data_dir)),
            Arc::new(SystemClock),
            settings,
        ));

        Ok(Self { config, dashboard })
    }

    pub fn coach(&self) -> Result<CoachService> {
        let client = HttpCoachClient::from_config(&self.config.coach)?;
        Ok(CoachService::new(Arc::new(client), self.dashboard.clone())
            .with_fallback(self.config.coach.fallback_message.clone()))
    }
}
