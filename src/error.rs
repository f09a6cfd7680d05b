use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PathfinderError>;

#[derive(Debug, Error)]
pub enum PathfinderError {
    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Topic {0} appears in more than one column")]
    DuplicateTopic(String),

    #[error("Column {0} is defined more than once")]
    DuplicateColumn(String),

    #[error("Invalid topic ID: {0:?}")]
    InvalidTopicId(String),

    #[error("Invalid view transition from {from} on {event}")]
    InvalidViewTransition { from: String, event: String },

    #[error("Board not initialized")]
    BoardNotInitialized,

    #[error("Commit not confirmed within {0:?}")]
    CommitTimeout(Duration),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
