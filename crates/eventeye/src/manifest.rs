//! Batch results.

use std::path::PathBuf;

use serde::Serialize;

use eventeye_core::{Event, VerificationToken};

use crate::error::IssueFailure;

/// A successfully issued certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issued {
    pub token: VerificationToken,
    /// Where the artifact was written.
    pub artifact: PathBuf,
    pub verify_url: String,
}

/// Outcome for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Issued(Issued),
    Failed { error: IssueFailure },
}

/// One row of a [`Manifest`], in the order participants were submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub participant_name: String,
    pub email: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ManifestEntry {
    pub fn issued(&self) -> Option<&Issued> {
        match &self.outcome {
            Outcome::Issued(issued) => Some(issued),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&IssueFailure> {
        match &self.outcome {
            Outcome::Issued(_) => None,
            Outcome::Failed { error } => Some(error),
        }
    }
}

/// Everything a caller needs after issuing a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub event: Event,
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Number of certificates issued.
    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.issued().is_some()).count()
    }

    /// Number of participants that failed.
    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    /// Successful entries.
    pub fn issued(&self) -> impl Iterator<Item = (&ManifestEntry, &Issued)> {
        self.entries
            .iter()
            .filter_map(|e| e.issued().map(|issued| (e, issued)))
    }

    /// Failed entries, for the caller to retry if it wants.
    pub fn failures(&self) -> impl Iterator<Item = (&ManifestEntry, &IssueFailure)> {
        self.entries
            .iter()
            .filter_map(|e| e.failure().map(|failure| (e, failure)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventeye_core::TOKEN_BYTES;

    fn manifest() -> Manifest {
        let token = VerificationToken::from_bytes([0x11; TOKEN_BYTES]);
        Manifest {
            event: Event::new("Hackathon 2025", "2025-10-10", "EventEye"),
            entries: vec![
                ManifestEntry {
                    participant_name: "Jane Doe".into(),
                    email: "jane@x.com".into(),
                    outcome: Outcome::Issued(Issued {
                        token,
                        artifact: PathBuf::from("certificates/Jane_Doe_certificate.pdf"),
                        verify_url: format!("http://localhost:5000/verify/{}", token),
                    }),
                },
                ManifestEntry {
                    participant_name: String::new(),
                    email: "nobody@x.com".into(),
                    outcome: Outcome::Failed {
                        error: IssueFailure::RenderFailure("participant name is empty".into()),
                    },
                },
            ],
        }
    }

    #[test]
    fn test_counts() {
        let m = manifest();
        assert_eq!(m.succeeded(), 1);
        assert_eq!(m.failed(), 1);
        assert_eq!(m.issued().next().unwrap().0.participant_name, "Jane Doe");
        assert_eq!(m.failures().next().unwrap().0.email, "nobody@x.com");
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(manifest()).unwrap();
        let first = &json["entries"][0];
        assert_eq!(first["status"], "issued");
        assert_eq!(first["participant_name"], "Jane Doe");
        assert_eq!(first["token"], "11".repeat(TOKEN_BYTES));

        let second = &json["entries"][1];
        assert_eq!(second["status"], "failed");
        assert_eq!(second["error"]["kind"], "render_failure");
    }
}
