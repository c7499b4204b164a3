// error.rs — Error types for the goal tracking subsystem.

use thiserror::Error;

/// Errors that can occur while creating goals, recording events,
/// or moving tracker state to and from disk.
#[derive(Debug, Error)]
pub enum QuestError {
    /// Goal construction parameters were rejected.
    #[error("invalid goal {field}: {reason}")]
    InvalidGoal { field: &'static str, reason: String },

    /// A goal with the same name (ignoring case) already exists.
    #[error("a goal named '{0}' already exists")]
    DuplicateName(String),

    /// No goal matches the requested name.
    #[error("goal not found: {0}")]
    NotFound(String),

    /// A persisted record carried a type tag we don't know.
    #[error("unknown goal type: {0}")]
    UnknownGoalType(String),

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize tracker data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The configuration file could not be parsed.
    #[error("config error at {path}: {reason}")]
    ConfigError { path: String, reason: String },

    /// A persisted goal's fields contradict each other.
    #[error("inconsistent record for goal '{name}': {reason}")]
    InconsistentRecord { name: String, reason: String },
}

impl QuestError {
    /// Whether this error came from reading or writing durable state
    /// rather than from a goal or tracker operation.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            QuestError::IoError { .. }
                | QuestError::SerializationError(_)
                | QuestError::ConfigError { .. }
                | QuestError::InconsistentRecord { .. }
        )
    }
}
