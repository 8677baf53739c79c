use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskboardError>;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("Invalid task id: {0}")]
    InvalidTaskId(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "sqlite-storage")]
impl From<rusqlite::Error> for TaskboardError {
    fn from(err: rusqlite::Error) -> Self {
        TaskboardError::StorageError(err.to_string())
    }
}
