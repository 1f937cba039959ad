use std::path::PathBuf;

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by the file-backed settings store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading a settings document from disk failed.
    #[error("reading `{path}`: {source}")]
    Read {
        /// Document that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing a settings document to disk failed.
    #[error("writing `{path}`: {source}")]
    Write {
        /// Document that failed to persist.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A settings document on disk is not valid JSON for its model.
    #[error("decoding `{path}`: {source}")]
    Decode {
        /// Document that failed to parse.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// A settings document could not be serialized.
    #[error("encoding `{path}`: {source}")]
    Encode {
        /// Document that failed to serialize.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
}
