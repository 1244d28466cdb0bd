/// Centralized error types for post-stamp using thiserror
///
/// `StampError` only surfaces at startup. Per-document failures stay as
/// `ScanError`/`UpdateError`, are logged by the tracker, and the loop moves on.
use thiserror::Error;

/// Main error type for post-stamp
#[derive(Error, Debug)]
pub enum StampError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to walking and fingerprinting the watched directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to read file '{file}': {reason}")]
    FileReadFailed { file: String, reason: String },
}

/// Errors raised while rewriting a document's date
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Failed to read file '{file}': {reason}")]
    ReadFailed { file: String, reason: String },

    #[error("Failed to write file '{file}': {reason}")]
    WriteFailed { file: String, reason: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}
