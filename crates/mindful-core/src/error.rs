//! Error types for the Mindful workspace.

use thiserror::Error;

/// A shared error type for every Mindful crate.
///
/// Persistence problems inside the dashboard engine are logged and swallowed;
/// this type is what surfaces everywhere else (CRUD operations, configuration,
/// the coach client).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MindfulError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (key-value store layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Status change that the lifecycle does not allow
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Write that collides with existing data (e.g. a booked slot)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Coach completion endpoint failure
    #[error("Coach error: {0}")]
    Coach(String),
}

impl MindfulError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Coach error
    pub fn coach(message: impl Into<String>) -> Self {
        Self::Coach(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MindfulError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MindfulError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MindfulError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MindfulError>`.
pub type Result<T> = std::result::Result<T, MindfulError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = MindfulError::not_found("therapy session", "42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: therapy session '42'");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<Vec<u32>, _> = serde_json::from_str("{oops");
        let err: MindfulError = parse.unwrap_err().into();
        assert!(err.is_serialization());
    }
}
