use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("thumbnail directory not found: {}", .0.display())]
    CacheDirNotFound(PathBuf),

    #[error("scan thumbnail directory {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{} is not PNG", .0.display())]
    NotPng(PathBuf),

    #[error("{}: unreadable PNG metadata: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: png::DecodingError,
    },

    #[error("unsupported URI scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
