//! Verification lookups.

use serde::Serialize;

use eventeye_core::{VerificationRecord, VerificationToken};
use eventeye_registry::Registry;
use eventeye_render::render_confirmation;

use crate::error::{IssueError, Result};

/// Result of looking up a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verification {
    Verified(VerificationRecord),
    NotFound,
}

impl Verification {
    pub fn record(&self) -> Option<&VerificationRecord> {
        match self {
            Self::Verified(record) => Some(record),
            Self::NotFound => None,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified(_))
    }

    /// HTML confirmation fragment for this result.
    pub fn to_html(&self) -> Result<String> {
        render_confirmation(self.record()).map_err(IssueError::from)
    }
}

/// Look up a raw token string.
///
/// A token that does not parse can never have been issued, so it is
/// [`Verification::NotFound`] rather than an error. Registry failures are
/// errors.
pub async fn verify<R: Registry + ?Sized>(registry: &R, raw: &str) -> Result<Verification> {
    let token = match VerificationToken::parse(raw.trim()) {
        Ok(token) => token,
        Err(e) => {
            tracing::debug!(token = raw, error = %e, "malformed verification token");
            return Ok(Verification::NotFound);
        }
    };

    Ok(match registry.lookup(&token).await? {
        Some(record) => Verification::Verified(record),
        None => Verification::NotFound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventeye_core::{Event, Participant};
    use eventeye_registry::MemoryRegistry;

    #[tokio::test]
    async fn test_verify_known_token() {
        let registry = MemoryRegistry::new();
        let token = VerificationToken::generate();
        let event = Event::new("Hackathon 2025", "2025-10-10", "EventEye");
        let jane = Participant::new("Jane Doe", "jane@x.com");
        let record = VerificationRecord::new(&jane, &event, 1);
        registry.register(&token, &record).await.unwrap();

        let result = verify(&registry, &token.to_hex()).await.unwrap();
        assert_eq!(result.record(), Some(&record));
        assert!(result.to_html().unwrap().contains("Certificate Verified"));
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_tokens() {
        let registry = MemoryRegistry::new();

        let zeros = "0".repeat(32);
        for raw in ["deadbeef", "", "not a token", zeros.as_str()] {
            let result = verify(&registry, raw).await.unwrap();
            assert_eq!(result, Verification::NotFound, "token {:?}", raw);
        }
        assert!(verify(&registry, "deadbeef")
            .await
            .unwrap()
            .to_html()
            .unwrap()
            .contains("Invalid or expired certificate"));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Verification::NotFound).unwrap();
        assert_eq!(json["status"], "not_found");
    }
}
