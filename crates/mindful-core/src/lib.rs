pub mod clock;
pub mod coach;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod journal;
pub mod record;
pub mod seed;
pub mod store;
pub mod therapy;

// Re-export common error type
pub use error::MindfulError;
