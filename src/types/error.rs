use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionedError {
    #[error("no such file: {}", .0.display())]
    NoSuchFile(PathBuf),
    #[error("modification time out of range: {}", .0.display())]
    InvalidMtime(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid format template: {0}")]
    InvalidFormat(String),
    #[error("Versioned filter called before init_app")]
    NotInitialized,
    #[error("Unknown template filter: {0}")]
    UnknownFilter(String),
}
