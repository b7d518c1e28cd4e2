pub mod config_service;
pub mod http_coach_client;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http_coach_client::HttpCoachClient;
pub use crate::paths::MindfulPaths;
pub use crate::storage::{InMemoryStore, JsonFileStore};
