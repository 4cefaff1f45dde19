use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the static content corpus.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse content file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Content directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error("Unknown track: {0}")]
    UnknownTrack(String),
}

pub type ContentResult<T> = Result<T, ContentError>;
