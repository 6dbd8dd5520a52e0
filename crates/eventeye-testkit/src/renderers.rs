//! Renderer test doubles.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use eventeye_render::{Document, RenderError, Renderer, Result};

#[derive(Debug, Default)]
struct Counters {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Writes the filled-in HTML under whatever extension it is given, and
/// counts calls.
///
/// Clones share counters, so keep a clone to read them after handing the
/// renderer to an issuer.
#[derive(Debug, Clone)]
pub struct StubRenderer {
    extension: &'static str,
    delay: Option<Duration>,
    counters: Arc<Counters>,
}

impl StubRenderer {
    /// Stub that produces `.pdf` paths.
    pub fn pdf() -> Self {
        Self {
            extension: "pdf",
            delay: None,
            counters: Arc::default(),
        }
    }

    /// Sleep for `delay` inside every render.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of completed or started renders.
    pub fn calls(&self) -> usize {
        self.counters.calls.load(Ordering::SeqCst)
    }

    /// Highest number of renders observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Renderer for StubRenderer {
    fn extension(&self) -> &str {
        self.extension
    }

    async fn render(&self, document: &Document, output: &Path) -> Result<()> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let written = tokio::fs::write(output, document.html.as_bytes()).await;

        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
        written?;
        Ok(())
    }
}

/// Always fails with a backend error.
#[derive(Debug, Clone)]
pub struct FailingRenderer {
    message: String,
}

impl FailingRenderer {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Renderer for FailingRenderer {
    fn extension(&self) -> &str {
        "pdf"
    }

    async fn render(&self, _document: &Document, _output: &Path) -> Result<()> {
        Err(RenderError::Backend(self.message.clone()))
    }
}

/// Never finishes. Pair with a short render timeout.
///
/// With a marker, only documents containing the marker hang; the rest are
/// written like [`StubRenderer`] does.
#[derive(Debug, Clone, Default)]
pub struct HangingRenderer {
    marker: Option<String>,
}

impl HangingRenderer {
    /// Hang on every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hang only on documents containing `marker`.
    pub fn matching(marker: impl Into<String>) -> Self {
        Self {
            marker: Some(marker.into()),
        }
    }
}

#[async_trait]
impl Renderer for HangingRenderer {
    fn extension(&self) -> &str {
        "pdf"
    }

    async fn render(&self, document: &Document, output: &Path) -> Result<()> {
        let hang = match &self.marker {
            Some(marker) => document.html.contains(marker.as_str()),
            None => true,
        };
        if hang {
            std::future::pending::<()>().await;
        }
        tokio::fs::write(output, document.html.as_bytes()).await?;
        Ok(())
    }
}
