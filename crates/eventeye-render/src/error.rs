//! Error types for the render module.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while producing a certificate document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The certificate template file does not exist.
    #[error("certificate template not found at {}", .0.display())]
    TemplateMissing(PathBuf),

    /// The template failed to parse or render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The verification code could not be generated.
    #[error("verification code encoding failed: {0}")]
    Encoding(String),

    /// The rendering backend crashed or reported failure.
    #[error("render backend failed: {0}")]
    Backend(String),

    /// The rendering backend did not finish in time.
    #[error("render timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
