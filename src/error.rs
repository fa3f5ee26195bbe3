//! Error types for the year sorter

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for year sorter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the year sorter
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} is not a valid path", path.display())]
    InvalidInputPath { path: PathBuf },

    #[error("Timestamp {value:?} has no numeric seconds field to increment")]
    MalformedTimestamp { value: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
}
