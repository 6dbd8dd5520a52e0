//! Issuer configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use eventeye_core::{artifact_file_name, VerificationToken};
use eventeye_render::ChromiumConfig;

/// Where artifacts land under the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactLayout {
    /// `<output_dir>/<token>/<name>_certificate.<ext>`.
    ///
    /// Re-issuing for the same participant never overwrites an earlier
    /// artifact, so every token keeps pointing at its own file.
    #[default]
    TokenScoped,
    /// `<output_dir>/<name>_certificate.<ext>`.
    ///
    /// Re-issuing overwrites the previous file; older tokens still verify
    /// but their artifact is gone.
    Flat,
}

impl ArtifactLayout {
    /// Path of the artifact for one issuance.
    pub fn artifact_path(
        &self,
        output_dir: &Path,
        token: &VerificationToken,
        participant_name: &str,
        extension: &str,
    ) -> PathBuf {
        let file_name = artifact_file_name(participant_name, extension);
        match self {
            Self::TokenScoped => output_dir.join(token.to_hex()).join(file_name),
            Self::Flat => output_dir.join(file_name),
        }
    }
}

/// Configuration for the [`Issuer`](crate::Issuer).
///
/// Every field has a default, so a partial document deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerConfig {
    /// Prefix of verification URLs: `<base_url>/verify/<token>`.
    pub base_url: String,
    /// Directory artifacts are written under.
    pub output_dir: PathBuf,
    /// HTML certificate template.
    pub template_path: PathBuf,
    /// Number of concurrent renders in a batch.
    pub workers: usize,
    /// Upper bound on a single render, in milliseconds.
    pub render_timeout_ms: u64,
    /// Artifact path layout.
    pub layout: ArtifactLayout,
    /// Browser settings for [`Issuer::with_chromium`](crate::Issuer::with_chromium).
    pub chromium: ChromiumConfig,
}

impl IssuerConfig {
    /// Replace the output directory and template path.
    pub fn with_paths(
        mut self,
        output_dir: impl Into<PathBuf>,
        template_path: impl Into<PathBuf>,
    ) -> Self {
        self.output_dir = output_dir.into();
        self.template_path = template_path.into();
        self
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }

    /// Worker count actually used: at least one, at most what a semaphore
    /// can hand out.
    pub fn effective_workers(&self) -> usize {
        self.workers.clamp(1, tokio::sync::Semaphore::MAX_PERMITS)
    }
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            output_dir: PathBuf::from("certificates"),
            template_path: PathBuf::from("templates/certificate.html"),
            workers: 4,
            render_timeout_ms: 30_000,
            layout: ArtifactLayout::default(),
            chromium: ChromiumConfig::default(),
        }
    }
}

/// Defaults pointed at a test fixture's directories.
#[cfg(test)]
pub(crate) fn test_config(fixture: &eventeye_testkit::TestFixture) -> IssuerConfig {
    IssuerConfig::default().with_paths(fixture.output_dir(), fixture.template_path())
}
