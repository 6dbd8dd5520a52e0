//! Error types for the registry module.

use eventeye_core::VerificationToken;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The token is already registered.
    ///
    /// With 128-bit random tokens this never happens in practice; if it
    /// does, the entropy source is suspect.
    #[error("duplicate verification token: {0}")]
    DuplicateToken(VerificationToken),

    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A registry lock was poisoned by a panicking writer.
    #[error("registry lock poisoned")]
    LockPoisoned,

    /// A blocking storage task failed to complete.
    #[error("storage task failed: {0}")]
    Task(String),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
