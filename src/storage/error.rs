use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt snapshot under key '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Background writer stopped")]
    WriterClosed,
}

pub type StorageResult<T> = Result<T, StorageError>;
