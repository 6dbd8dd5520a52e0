//! Renderer that writes the filled-in HTML as the artifact.
//!
//! Handy for previews and for deployments that print certificates from a
//! browser instead of shipping PDFs.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::renderer::Renderer;
use crate::template::Document;

/// Writes `<name>_certificate.html` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

#[async_trait]
impl Renderer for HtmlRenderer {
    fn extension(&self) -> &str {
        "html"
    }

    async fn render(&self, document: &Document, output: &Path) -> Result<()> {
        tokio::fs::write(output, document.html.as_bytes()).await?;
        Ok(())
    }
}
