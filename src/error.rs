// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for blsync
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be constructed
    #[error("Failed to initialize: {0}")]
    InitError(String),

    /// Local manifest file does not exist
    #[error("Manifest file {} does not exist", .0.display())]
    ManifestNotFound(PathBuf),

    /// Request failed, returned a non-success status, or the body could not be read
    #[error("Download error: {0}")]
    DownloadError(String),

    /// Invalid option value
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The manifest carries no base download URL
    #[error("No download location configured in manifest")]
    NoRemoteConfigured,
}

/// Result type alias using blsync's Error type
pub type Result<T> = std::result::Result<T, Error>;
