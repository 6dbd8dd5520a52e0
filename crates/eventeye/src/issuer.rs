//! The Issuer: issues certificates and answers verification requests.
//!
//! The issuer owns nothing global. It is handed a registry and a renderer
//! at construction, and every batch loads the template fresh so template
//! edits take effect without a restart.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use eventeye_core::{
    now_millis, validate_event, validate_participant, verify_url, Event, Participant,
    VerificationRecord, VerificationToken,
};
use eventeye_registry::Registry;
use eventeye_render::{
    render_with_timeout, CertificateFields, CertificateTemplate, ChromiumRenderer, Document,
    QrImage, Renderer,
};

use crate::batch;
use crate::config::{ArtifactLayout, IssuerConfig};
use crate::error::{IssueError, Result};
use crate::manifest::{Issued, Manifest};
use crate::verify::{self, Verification};

/// The main Issuer struct.
///
/// Provides:
/// - Single issuance ([`Issuer::issue`])
/// - Batch issuance with bounded parallelism ([`Issuer::issue_for_event`])
/// - Verification by token ([`Issuer::verify`])
pub struct Issuer<R: Registry> {
    registry: Arc<R>,
    renderer: Arc<dyn Renderer>,
    config: Arc<IssuerConfig>,
}

impl<R: Registry + 'static> Issuer<R> {
    /// Create a new issuer.
    pub fn new(registry: R, renderer: impl Renderer + 'static, config: IssuerConfig) -> Self {
        Self::from_shared(Arc::new(registry), Arc::new(renderer), config)
    }

    /// Create an issuer around a registry and renderer shared with other
    /// components (e.g. a verification endpoint holding the same registry).
    pub fn from_shared(
        registry: Arc<R>,
        renderer: Arc<dyn Renderer>,
        config: IssuerConfig,
    ) -> Self {
        Self {
            registry,
            renderer,
            config: Arc::new(config),
        }
    }

    /// Create an issuer that prints PDFs with headless Chromium, using
    /// `config.chromium`.
    pub fn with_chromium(registry: R, config: IssuerConfig) -> Self {
        let renderer = ChromiumRenderer::new(config.chromium.clone());
        Self::new(registry, renderer, config)
    }

    /// Get the registry reference.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Get a shared handle to the registry.
    pub fn shared_registry(&self) -> Arc<R> {
        Arc::clone(&self.registry)
    }

    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Issuance
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue one certificate.
    ///
    /// Mints a token, renders the artifact and registers the token, in that
    /// order. Nothing is registered if rendering fails.
    pub async fn issue(&self, participant: &Participant, event: &Event) -> Result<Issued> {
        validate_event(event).map_err(IssueError::InvalidEvent)?;
        let pipeline = self.pipeline().await?;
        pipeline.run(participant, event).await
    }

    /// Issue certificates for every participant of an event.
    ///
    /// Participants are processed independently by a pool of
    /// `config.workers` workers. Render, encoding and registry failures are
    /// recorded per participant in the returned [`Manifest`].
    ///
    /// A missing template or an invalid event fails before anything is
    /// issued. A duplicate token or a crashed worker stops the batch with
    /// [`IssueError::Aborted`], which carries the entries finished so far.
    pub async fn issue_for_event(
        &self,
        event: &Event,
        participants: Vec<Participant>,
    ) -> Result<Manifest> {
        validate_event(event).map_err(IssueError::InvalidEvent)?;
        if participants.is_empty() {
            return Err(IssueError::EmptyBatch);
        }

        let pipeline = self.pipeline().await?;
        let total = participants.len();
        tracing::info!(
            event = %event.name,
            participants = total,
            workers = self.config.effective_workers(),
            "issuing certificates"
        );

        let manifest = match batch::run(
            pipeline,
            Arc::new(event.clone()),
            participants,
            self.config.effective_workers(),
        )
        .await
        {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::error!(event = %event.name, error = %e, "certificate batch aborted");
                return Err(e);
            }
        };
        tracing::info!(
            event = %event.name,
            succeeded = manifest.succeeded(),
            failed = manifest.failed(),
            "certificate batch complete"
        );
        Ok(manifest)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up a token as received from a verification URL.
    ///
    /// Unknown and malformed tokens are [`Verification::NotFound`].
    pub async fn verify(&self, token: &str) -> Result<Verification> {
        verify::verify(self.registry.as_ref(), token).await
    }

    async fn pipeline(&self) -> Result<Pipeline<R>> {
        let template = CertificateTemplate::load(&self.config.template_path).await?;
        Ok(Pipeline {
            registry: Arc::clone(&self.registry),
            renderer: Arc::clone(&self.renderer),
            template: Arc::new(template),
            config: Arc::clone(&self.config),
        })
    }
}

/// Everything one issuance needs, cheap to clone into worker tasks.
pub(crate) struct Pipeline<R: Registry> {
    registry: Arc<R>,
    renderer: Arc<dyn Renderer>,
    template: Arc<CertificateTemplate>,
    config: Arc<IssuerConfig>,
}

impl<R: Registry> Clone for Pipeline<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            renderer: Arc::clone(&self.renderer),
            template: Arc::clone(&self.template),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R: Registry> Pipeline<R> {
    pub(crate) async fn run(&self, participant: &Participant, event: &Event) -> Result<Issued> {
        validate_participant(participant).map_err(|e| IssueError::RenderFailure(e.to_string()))?;

        let token = VerificationToken::generate();
        let url = verify_url(&self.config.base_url, &token);
        let qr = QrImage::encode(&url)?;

        let fields = CertificateFields::new(participant, event, url.clone(), qr);
        let document = self.template.render(&fields)?;

        let artifact = self.config.layout.artifact_path(
            &self.config.output_dir,
            &token,
            &participant.name,
            self.renderer.extension(),
        );
        let written = self
            .write_and_register(&token, &document, &artifact, participant, event)
            .await;
        if let Err(e) = written {
            self.discard(&token, &artifact, &e).await;
            return Err(e);
        }

        tracing::info!(
            participant = %participant.name,
            token = %token,
            artifact = %artifact.display(),
            "issued certificate"
        );

        Ok(Issued {
            token,
            artifact,
            verify_url: url,
        })
    }

    async fn write_and_register(
        &self,
        token: &VerificationToken,
        document: &Document,
        artifact: &Path,
        participant: &Participant,
        event: &Event,
    ) -> Result<()> {
        if let Some(dir) = artifact.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                IssueError::RenderFailure(format!(
                    "cannot create output directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        render_with_timeout(
            self.renderer.as_ref(),
            document,
            artifact,
            self.config.render_timeout(),
        )
        .await?;

        // Register only once the artifact exists.
        let record = VerificationRecord::new(participant, event, now_millis());
        self.registry.register(token, &record).await?;
        Ok(())
    }

    /// Remove whatever a failed issuance left on disk.
    ///
    /// A token-scoped directory belongs to this issuance alone and goes
    /// entirely. A flat path may still hold an earlier certificate, so it is
    /// only removed once this issuance's own render has overwritten it.
    async fn discard(&self, token: &VerificationToken, artifact: &Path, cause: &IssueError) {
        let (path, removed) = match self.config.layout {
            ArtifactLayout::TokenScoped => {
                let dir = self.config.output_dir.join(token.to_hex());
                let removed = tokio::fs::remove_dir_all(&dir).await;
                (dir, removed)
            }
            ArtifactLayout::Flat => {
                let rendered = matches!(
                    cause,
                    IssueError::Registry(_) | IssueError::DuplicateToken(_)
                );
                if !rendered {
                    return;
                }
                (artifact.to_path_buf(), tokio::fs::remove_file(artifact).await)
            }
        };

        if let Err(e) = removed {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to remove discarded artifact"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventeye_registry::MemoryRegistry;
    use crate::config::test_config;
    use eventeye_testkit::{FailingRenderer, HangingRenderer, StubRenderer, TestFixture};

    fn entries_in(dir: &Path) -> usize {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries.count(),
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => panic!("cannot read {}: {}", dir.display(), e),
        }
    }

    #[tokio::test]
    async fn test_issue_registers_after_render() {
        let fixture = TestFixture::new();
        let issuer = Issuer::new(
            MemoryRegistry::new(),
            StubRenderer::pdf(),
            test_config(&fixture),
        );

        let issued = issuer
            .issue(&fixture.participant("Jane Doe"), &fixture.event())
            .await
            .unwrap();

        assert!(issued.artifact.exists());
        assert!(issued.verify_url.ends_with(&issued.token.to_hex()));
        let record = issuer.registry().lookup(&issued.token).await.unwrap().unwrap();
        assert_eq!(record.participant_name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_failed_render_registers_nothing() {
        let fixture = TestFixture::new();
        let issuer = Issuer::new(
            MemoryRegistry::new(),
            FailingRenderer::new("backend crashed"),
            test_config(&fixture),
        );

        let err = issuer
            .issue(&fixture.participant("Jane Doe"), &fixture.event())
            .await
            .unwrap_err();

        assert!(matches!(err, IssueError::RenderFailure(ref m) if m.contains("backend crashed")));
        assert!(issuer.registry().is_empty().await.unwrap());
        assert_eq!(entries_in(&fixture.output_dir()), 0);
    }

    #[tokio::test]
    async fn test_timed_out_render_leaves_no_directory() {
        let fixture = TestFixture::new();
        let mut config = test_config(&fixture);
        config.render_timeout_ms = 50;
        let issuer = Issuer::new(MemoryRegistry::new(), HangingRenderer::new(), config);

        let err = issuer
            .issue(&fixture.participant("Jane Doe"), &fixture.event())
            .await
            .unwrap_err();

        assert!(matches!(err, IssueError::RenderFailure(_)));
        assert_eq!(entries_in(&fixture.output_dir()), 0);
    }

    #[tokio::test]
    async fn test_flat_layout_failed_render_keeps_earlier_certificate() {
        let fixture = TestFixture::new();
        let mut config = test_config(&fixture);
        config.layout = ArtifactLayout::Flat;
        let participant = fixture.participant("Jane Doe");

        let first = Issuer::new(MemoryRegistry::new(), StubRenderer::pdf(), config.clone())
            .issue(&participant, &fixture.event())
            .await
            .unwrap();
        Issuer::new(MemoryRegistry::new(), FailingRenderer::new("boom"), config)
            .issue(&participant, &fixture.event())
            .await
            .unwrap_err();

        assert!(first.artifact.exists());
    }

    #[tokio::test]
    async fn test_empty_name_is_render_failure() {
        let fixture = TestFixture::new();
        let issuer = Issuer::new(
            MemoryRegistry::new(),
            StubRenderer::pdf(),
            test_config(&fixture),
        );

        let err = issuer
            .issue(&fixture.participant(""), &fixture.event())
            .await
            .unwrap_err();
        assert!(matches!(err, IssueError::RenderFailure(_)));
    }

    #[tokio::test]
    async fn test_oversized_base_url_is_encoding_failure() {
        let fixture = TestFixture::new();
        let mut config = test_config(&fixture);
        config.base_url = format!("https://example.org/{}", "x".repeat(8_000));
        let issuer = Issuer::new(MemoryRegistry::new(), StubRenderer::pdf(), config);

        let err = issuer
            .issue(&fixture.participant("Jane Doe"), &fixture.event())
            .await
            .unwrap_err();
        assert!(matches!(err, IssueError::EncodingFailure(_)));
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_invalid_event_rejected() {
        let fixture = TestFixture::new();
        let issuer = Issuer::new(
            MemoryRegistry::new(),
            StubRenderer::pdf(),
            test_config(&fixture),
        );

        let event = Event::new("Hackathon 2025", "", "EventEye");
        let err = issuer
            .issue(&fixture.participant("Jane Doe"), &event)
            .await
            .unwrap_err();
        assert!(matches!(err, IssueError::InvalidEvent(_)));
    }

    #[tokio::test]
    async fn test_flat_layout_overwrites() {
        let fixture = TestFixture::new();
        let mut config = test_config(&fixture);
        config.layout = crate::ArtifactLayout::Flat;
        let issuer = Issuer::new(MemoryRegistry::new(), StubRenderer::pdf(), config);

        let participant = fixture.participant("Jane Doe");
        let first = issuer.issue(&participant, &fixture.event()).await.unwrap();
        let second = issuer.issue(&participant, &fixture.event()).await.unwrap();

        assert_eq!(first.artifact, second.artifact);
        assert_ne!(first.token, second.token);
        // Both tokens still verify
        assert!(issuer.verify(&first.token.to_hex()).await.unwrap().is_verified());
        assert!(issuer.verify(&second.token.to_hex()).await.unwrap().is_verified());
    }
}
