//! Certificate templates.
//!
//! Templates are HTML with `{{ name }}`, `{{ event }}`, `{{ date }}`,
//! `{{ organizer }}`, `{{ qr_code }}` and `{{ verify_url }}` placeholders.
//! Every field is HTML-escaped on output except `qr_code`, which is a
//! base64 data URI produced by [`QrImage`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use minijinja::{context, AutoEscape, Environment, Value};

use eventeye_core::{Event, Participant};

use crate::error::{RenderError, Result};
use crate::qr::QrImage;

const TEMPLATE_NAME: &str = "certificate.html";

/// The values substituted into a certificate template.
#[derive(Debug, Clone)]
pub struct CertificateFields {
    pub name: String,
    pub event: String,
    pub date: String,
    pub organizer: String,
    pub verify_url: String,
    pub qr_code: QrImage,
}

impl CertificateFields {
    pub fn new(
        participant: &Participant,
        event: &Event,
        verify_url: String,
        qr_code: QrImage,
    ) -> Self {
        Self {
            name: participant.name.clone(),
            event: event.name.clone(),
            date: event.date.clone(),
            organizer: event.organizer.clone(),
            verify_url,
            qr_code,
        }
    }

    fn to_context(&self) -> Value {
        context! {
            name => &self.name,
            event => &self.event,
            date => &self.date,
            organizer => &self.organizer,
            verify_url => &self.verify_url,
            qr_code => Value::from_safe_string(self.qr_code.data_uri()),
        }
    }
}

/// A filled-in certificate, ready for a [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub html: String,
}

/// A compiled certificate template.
#[derive(Debug)]
pub struct CertificateTemplate {
    env: Environment<'static>,
    origin: Option<PathBuf>,
}

impl CertificateTemplate {
    /// Load and compile a template from disk.
    ///
    /// A missing file is [`RenderError::TemplateMissing`]; any other read
    /// failure is an I/O error.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = match tokio::fs::read_to_string(path).await {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RenderError::TemplateMissing(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut template = Self::from_source(source)?;
        template.origin = Some(path.to_path_buf());
        tracing::debug!(template = %path.display(), "loaded certificate template");
        Ok(template)
    }

    /// Compile a template from a string.
    pub fn from_source(source: impl Into<String>) -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template_owned(TEMPLATE_NAME, source.into())?;
        Ok(Self { env, origin: None })
    }

    /// Where the template was loaded from, if it came from disk.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Substitute the fields into the template.
    pub fn render(&self, fields: &CertificateFields) -> Result<Document> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let html = template.render(fields.to_context())?;
        Ok(Document { html })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"<h1>{{ name }}</h1><p>{{ event }} / {{ date }} / {{ organizer }}</p><img src="{{ qr_code }}"><a href="{{ verify_url }}">verify</a>"#;

    fn fields(name: &str) -> CertificateFields {
        let event = Event::new("Hackathon 2025", "2025-10-10", "EventEye");
        let url = "http://localhost:5000/verify/00".to_string();
        let qr = QrImage::encode(&url).unwrap();
        CertificateFields::new(&Participant::new(name, "jane@x.com"), &event, url, qr)
    }

    #[test]
    fn test_render_substitutes_fields() {
        let template = CertificateTemplate::from_source(SOURCE).unwrap();
        let doc = template.render(&fields("Jane Doe")).unwrap();

        assert!(doc.html.contains("<h1>Jane Doe</h1>"));
        assert!(doc.html.contains("Hackathon 2025 / 2025-10-10 / EventEye"));
        assert!(doc.html.contains(r#"<img src="data:image/svg+xml;base64,"#));
    }

    #[test]
    fn test_render_escapes_participant_name() {
        let template = CertificateTemplate::from_source(SOURCE).unwrap();
        let doc = template
            .render(&fields("<script>alert(1)</script>"))
            .unwrap();

        assert!(!doc.html.contains("<script>"));
        assert!(doc.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_legacy_placeholder_syntax() {
        let template =
            CertificateTemplate::from_source("{{name}} attended {{event}}").unwrap();
        let doc = template.render(&fields("Jane Doe")).unwrap();
        assert_eq!(doc.html, "Jane Doe attended Hackathon 2025");
    }

    #[test]
    fn test_invalid_template_syntax() {
        assert!(matches!(
            CertificateTemplate::from_source("{{ name "),
            Err(RenderError::Template(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.html");
        let err = CertificateTemplate::load(&path).await.unwrap_err();
        assert!(matches!(err, RenderError::TemplateMissing(p) if p == path));
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certificate.html");
        std::fs::write(&path, SOURCE).unwrap();

        let template = CertificateTemplate::load(&path).await.unwrap();
        assert_eq!(template.origin(), Some(path.as_path()));
    }
}
