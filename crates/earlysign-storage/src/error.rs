use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to persist '{key}': {reason}")]
    Persistence { key: String, reason: String },

    #[error("failed to read '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("stored record under '{key}' is corrupt: {reason}")]
    CorruptRecord { key: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
