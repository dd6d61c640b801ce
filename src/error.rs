use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Render error: {0}")]
    RenderError(#[from] askama::Error),
}

impl KanbanError {
    /// Returns true for errors caused by a stale column or task reference
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ColumnNotFound(_) | Self::TaskNotFound(_))
    }
}

impl From<toml::de::Error> for KanbanError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}
