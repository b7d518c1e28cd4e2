//! Configuration model (`config.toml`).
//!
//! Every section and field is optional in the file; missing values fall
//! back to the defaults below.

use crate::coach::FALLBACK_REPLY;
use crate::dashboard::calendar::Calendar;
use crate::error::{MindfulError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_STEP_GOAL: u64 = 10_000;
pub const DEFAULT_COACH_ENDPOINT: &str = "https://api.a0.dev/ai/llm";
pub const DEFAULT_COACH_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct MindfulConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub coach: CoachConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StorageConfig {
    /// Directory holding one JSON file per key. Resolved against the
    /// config directory when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// IANA zone name for calendar-day math; system local time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default = "default_step_goal")]
    pub step_goal: u64,
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timezone: None,
            step_goal: DEFAULT_STEP_GOAL,
            seed_sample_data: true,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CoachConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_fallback")]
    pub fallback_message: String,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: DEFAULT_COACH_TIMEOUT_SECS,
            fallback_message: default_fallback(),
        }
    }
}

fn default_step_goal() -> u64 {
    DEFAULT_STEP_GOAL
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_COACH_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_COACH_TIMEOUT_SECS
}

fn default_fallback() -> String {
    FALLBACK_REPLY.to_string()
}

impl MindfulConfig {
    /// Parses a config file body.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MindfulConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.calendar()?;
        if self.coach.timeout_secs == 0 {
            return Err(MindfulError::config("coach.timeout_secs must be greater than zero"));
        }
        if self.coach.endpoint.trim().is_empty() {
            return Err(MindfulError::config("coach.endpoint must not be empty"));
        }
        Ok(())
    }

    /// Calendar for the configured zone.
    pub fn calendar(&self) -> Result<Calendar> {
        Calendar::from_name(self.dashboard.timezone.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::calendar::CalendarZone;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = MindfulConfig::from_toml_str("").unwrap();
        assert_eq!(config, MindfulConfig::default());
        assert_eq!(config.dashboard.step_goal, 10_000);
        assert!(config.dashboard.seed_sample_data);
        assert_eq!(config.coach.timeout_secs, 30);
        assert_eq!(config.calendar().unwrap().zone(), CalendarZone::Local);
    }

    #[test]
    fn test_partial_sections() {
        let config = MindfulConfig::from_toml_str(
            r#"
            [dashboard]
            timezone = "Europe/Berlin"
            step_goal = 8000

            [coach]
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.dashboard.step_goal, 8000);
        assert!(config.dashboard.seed_sample_data);
        assert_eq!(config.coach.endpoint, DEFAULT_COACH_ENDPOINT);
        assert_eq!(config.coach.timeout_secs, 5);
        assert_eq!(
            config.calendar().unwrap().zone(),
            CalendarZone::Named(chrono_tz::Europe::Berlin)
        );
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let err = MindfulConfig::from_toml_str("[dashboard]\ntimezone = \"Mars/Olympus\"\n").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = MindfulConfig::from_toml_str("[coach]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_malformed_toml() {
        let err = MindfulConfig::from_toml_str("[dashboard\n").unwrap_err();
        assert!(err.is_serialization());
    }
}
