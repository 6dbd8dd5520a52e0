//! Error types for issuance.

use std::path::PathBuf;

use eventeye_core::{ValidationError, VerificationToken};
use eventeye_registry::RegistryError;
use eventeye_render::RenderError;
use serde::Serialize;
use thiserror::Error;

use crate::manifest::Manifest;

/// Errors that can occur while issuing certificates.
///
/// Use [`IssueError::is_fatal`] to tell batch-aborting errors from
/// per-participant ones.
#[derive(Debug, Error)]
pub enum IssueError {
    /// The certificate template is not where the configuration says.
    #[error("certificate template not found at {}", .0.display())]
    TemplateMissing(PathBuf),

    /// Rendering the artifact failed, timed out, or had nothing to render.
    #[error("render failed: {0}")]
    RenderFailure(String),

    /// The verification code could not be generated.
    #[error("verification code encoding failed: {0}")]
    EncodingFailure(String),

    /// A freshly minted token was already registered.
    #[error("duplicate verification token {0}; token entropy source is suspect")]
    DuplicateToken(VerificationToken),

    /// The event is missing a required field.
    #[error("invalid event: {0}")]
    InvalidEvent(#[source] ValidationError),

    /// The batch has no participants.
    #[error("no participants to issue certificates for")]
    EmptyBatch,

    /// Registry failure other than a duplicate token.
    #[error("registry error: {0}")]
    Registry(#[source] RegistryError),

    /// A batch worker exited without reporting a result.
    #[error("issuance worker failed: {0}")]
    Worker(String),

    /// A batch stopped on a fatal error after it had started issuing.
    ///
    /// `partial` holds every participant that finished before the abort,
    /// in input order. Its issued certificates are registered and valid.
    #[error("certificate batch aborted after {} of its participants: {cause}", .partial.entries.len())]
    Aborted {
        #[source]
        cause: Box<IssueError>,
        partial: Manifest,
    },
}

impl IssueError {
    /// True if the error aborts a whole batch rather than one participant.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::RenderFailure(_) | Self::EncodingFailure(_) | Self::Registry(_)
        )
    }

    /// Results of an aborted batch that completed before the abort.
    pub fn partial_manifest(&self) -> Option<&Manifest> {
        match self {
            Self::Aborted { partial, .. } => Some(partial),
            _ => None,
        }
    }

    /// The error that stopped the batch, or `self` if it was not aborted.
    pub fn root_cause(&self) -> &IssueError {
        match self {
            Self::Aborted { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

impl From<RenderError> for IssueError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::TemplateMissing(path) => Self::TemplateMissing(path),
            RenderError::Encoding(msg) => Self::EncodingFailure(msg),
            other => Self::RenderFailure(other.to_string()),
        }
    }
}

impl From<RegistryError> for IssueError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::DuplicateToken(token) => Self::DuplicateToken(token),
            other => Self::Registry(other),
        }
    }
}

/// A per-participant failure recorded in a [`Manifest`](crate::Manifest).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum IssueFailure {
    #[error("render failed: {0}")]
    RenderFailure(String),

    #[error("verification code encoding failed: {0}")]
    EncodingFailure(String),

    /// The certificate was rendered but could not be registered, so it
    /// was discarded.
    #[error("registry error: {0}")]
    Registry(String),
}

impl TryFrom<IssueError> for IssueFailure {
    type Error = IssueError;

    /// Fatal errors are handed back unchanged.
    fn try_from(e: IssueError) -> std::result::Result<Self, IssueError> {
        match e {
            IssueError::RenderFailure(msg) => Ok(Self::RenderFailure(msg)),
            IssueError::EncodingFailure(msg) => Ok(Self::EncodingFailure(msg)),
            IssueError::Registry(e) => Ok(Self::Registry(e.to_string())),
            fatal => Err(fatal),
        }
    }
}

/// Result type for issuance operations.
pub type Result<T> = std::result::Result<T, IssueError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render_error_mapping() {
        let missing: IssueError = RenderError::TemplateMissing("t.html".into()).into();
        assert!(matches!(missing, IssueError::TemplateMissing(_)));
        assert!(missing.is_fatal());

        let timeout: IssueError = RenderError::Timeout(Duration::from_secs(1)).into();
        assert!(matches!(timeout, IssueError::RenderFailure(_)));
        assert!(!timeout.is_fatal());

        let encoding: IssueError = RenderError::Encoding("too long".into()).into();
        assert!(matches!(encoding, IssueError::EncodingFailure(_)));
    }

    #[test]
    fn test_duplicate_token_is_fatal() {
        let token = VerificationToken::generate();
        let err: IssueError = RegistryError::DuplicateToken(token).into();
        assert!(matches!(err, IssueError::DuplicateToken(t) if t == token));
        assert!(err.is_fatal());
        assert!(IssueFailure::try_from(err).is_err());
    }

    #[test]
    fn test_registry_io_error_is_per_participant() {
        let err: IssueError = RegistryError::Task("worker thread gone".into()).into();
        assert!(matches!(err, IssueError::Registry(_)));
        assert!(!err.is_fatal());
        assert!(matches!(
            IssueFailure::try_from(err),
            Ok(IssueFailure::Registry(m)) if m.contains("worker thread gone")
        ));
    }

    #[test]
    fn test_aborted_carries_partial_manifest() {
        let token = VerificationToken::generate();
        let err = IssueError::Aborted {
            cause: Box::new(IssueError::DuplicateToken(token)),
            partial: Manifest {
                event: eventeye_core::Event::new("Hackathon 2025", "2025-10-10", "EventEye"),
                entries: Vec::new(),
            },
        };

        assert!(err.is_fatal());
        assert!(matches!(err.root_cause(), IssueError::DuplicateToken(t) if *t == token));
        assert_eq!(err.partial_manifest().map(|m| m.entries.len()), Some(0));
        assert!(err.to_string().contains("after 0 of its participants"));
    }

    #[test]
    fn test_failure_serializes_with_kind() {
        let failure = IssueFailure::RenderFailure("participant name is empty".into());
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["kind"], "render_failure");
        assert_eq!(json["message"], "participant name is empty");
    }
}
