//! Error types for EventEye core.

use thiserror::Error;

/// Core errors that can occur while handling tokens.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid verification token: {0}")]
    InvalidToken(String),
}

/// Validation errors for caller-supplied event and participant records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("event field `{0}` is empty")]
    EmptyEventField(&'static str),

    #[error("participant name is empty")]
    EmptyParticipantName,
}
