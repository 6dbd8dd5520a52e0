//! Renderer abstraction.
//!
//! A renderer turns a filled-in [`Document`] into an artifact file. The
//! issuer does not care how: a headless browser, a plain HTML writer, or a
//! test double.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{RenderError, Result};
use crate::template::Document;

/// Renderer trait for producing certificate artifacts.
///
/// Implementations must be thread-safe (Send + Sync); the issuer calls
/// `render` from several workers at once, each with a distinct output path.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// File extension of produced artifacts, without the leading dot.
    fn extension(&self) -> &str;

    /// Render `document` to `output`.
    ///
    /// The parent directory of `output` already exists.
    async fn render(&self, document: &Document, output: &Path) -> Result<()>;
}

/// Render with an upper bound on wall time.
///
/// If the deadline passes, the render future is dropped and
/// [`RenderError::Timeout`] is returned.
pub async fn render_with_timeout(
    renderer: &dyn Renderer,
    document: &Document,
    output: &Path,
    timeout: Duration,
) -> Result<()> {
    match tokio::time::timeout(timeout, renderer.render(document, output)).await {
        Ok(result) => result,
        Err(_) => Err(RenderError::Timeout(timeout)),
    }
}
