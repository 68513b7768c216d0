//! Error types for the mockup pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a mockup
///
/// Every failure is terminal for the invocation; nothing in the pipeline
/// retries. Each variant renders as a single-line, human-readable message.
#[derive(Error, Debug)]
pub enum Error {
    /// Input file or stream could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input was not well-formed JSON
    #[error("Invalid JSON: {0}")]
    Parse(String),

    /// UI description failed structural validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Required generator configuration is missing
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Remote render call exceeded its deadline
    #[error("Render timed out after {0}ms")]
    Timeout(u64),

    /// Remote call was rejected as unauthorized
    #[error("Unauthorized: {0}")]
    Auth(String),

    /// Any other backend failure, including an unusable response payload
    #[error("Generator error: {0}")]
    Provider(String),

    /// Output path already exists and overwrite was not requested
    #[error("output exists, use --force to overwrite: {}", .0.display())]
    Conflict(PathBuf),
}
