//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use eventeye_core::{Event, Participant};

/// A minimal certificate template using every field the issuer supplies.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <h1>Certificate of Participation</h1>
  <p class="name">{{ name }}</p>
  <p class="event">{{ event }}</p>
  <p class="date">{{ date }}</p>
  <p class="organizer">{{ organizer }}</p>
  <img class="qr" src="{{ qr_code }}" alt="Scan to verify">
  <a class="verify" href="{{ verify_url }}">{{ verify_url }}</a>
</body>
</html>
"#;

/// A scratch directory holding a certificate template and an output
/// directory. Everything is removed when the fixture is dropped.
pub struct TestFixture {
    dir: TempDir,
}

impl TestFixture {
    /// Create a fixture with [`DEFAULT_TEMPLATE`].
    pub fn new() -> Self {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    /// Create a fixture with a custom template source.
    pub fn with_template(source: &str) -> Self {
        let dir = TempDir::new().expect("create fixture directory");
        fs::write(dir.path().join("certificate.html"), source).expect("write fixture template");
        Self { dir }
    }

    /// Root of the scratch directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Where artifacts should be written.
    pub fn output_dir(&self) -> PathBuf {
        self.root().join("certificates")
    }

    pub fn template_path(&self) -> PathBuf {
        self.root().join("certificate.html")
    }

    /// Remove the template, for exercising the missing-template path.
    pub fn remove_template(&self) {
        fs::remove_file(self.template_path()).expect("remove fixture template");
    }

    /// A valid sample event.
    pub fn event(&self) -> Event {
        Event::new("Hackathon 2025", "2025-10-10", "EventEye")
    }

    /// A participant with an email derived from `name`.
    pub fn participant(&self, name: &str) -> Participant {
        Participant::new(name, email_for(name))
    }

    /// One participant per name, in order.
    pub fn participants(&self, names: &[&str]) -> Vec<Participant> {
        names.iter().map(|name| self.participant(name)).collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn email_for(name: &str) -> String {
    let local: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '.' })
        .collect();
    if local.is_empty() {
        "anonymous@example.org".to_string()
    } else {
        format!("{}@example.org", local)
    }
}
