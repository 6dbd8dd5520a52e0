//! Headless Chromium renderer.
//!
//! Each render launches a fresh browser process with `--print-to-pdf`, so
//! renders are isolated from one another. The child is killed if the render
//! future is dropped, which is what happens when the issuer's timeout fires.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::error::{RenderError, Result};
use crate::renderer::Renderer;
use crate::template::Document;

/// Flags passed to every browser launch. Suitable for containers.
pub const DEFAULT_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-gpu",
    "--disable-dev-shm-usage",
    "--no-zygote",
];

/// Maximum number of stderr bytes kept in a backend error.
const STDERR_TAIL: usize = 512;

/// Configuration for [`ChromiumRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromiumConfig {
    /// Browser executable, looked up on `PATH` if relative.
    #[serde(default = "default_executable")]
    pub executable: PathBuf,
    /// Extra flags, passed after `--headless`.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

fn default_executable() -> PathBuf {
    PathBuf::from("chromium")
}

fn default_args() -> Vec<String> {
    DEFAULT_ARGS.iter().map(|s| s.to_string()).collect()
}

impl Default for ChromiumConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            args: default_args(),
        }
    }
}

/// Renders certificates to A4 PDFs with a headless Chromium.
#[derive(Debug, Clone, Default)]
pub struct ChromiumRenderer {
    config: ChromiumConfig,
}

impl ChromiumRenderer {
    pub fn new(config: ChromiumConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChromiumConfig {
        &self.config
    }

    async fn print_to_pdf(&self, input: &Path, output: &Path) -> Result<()> {
        let input = tokio::fs::canonicalize(input).await?;
        let executable = &self.config.executable;

        let result = Command::new(executable)
            .arg("--headless")
            .args(&self.config.args)
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(format!("file://{}", input.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                RenderError::Backend(format!("failed to launch {}: {}", executable.display(), e))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let start = stderr
                .char_indices()
                .rev()
                .nth(STDERR_TAIL)
                .map_or(0, |(i, _)| i);
            return Err(RenderError::Backend(format!(
                "{} exited with {}: {}",
                executable.display(),
                result.status,
                stderr[start..].trim()
            )));
        }

        if !tokio::fs::try_exists(output).await? {
            return Err(RenderError::Backend(format!(
                "{} produced no output at {}",
                executable.display(),
                output.display()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    fn extension(&self) -> &str {
        "pdf"
    }

    async fn render(&self, document: &Document, output: &Path) -> Result<()> {
        let staging = StagingFile(output.with_extension("staging.html"));
        tokio::fs::write(&staging.0, document.html.as_bytes()).await?;

        self.print_to_pdf(&staging.0, output).await
    }
}

/// HTML handed to the browser. Removed on drop, including when a timeout
/// drops the render mid-print.
struct StagingFile(PathBuf);

impl Drop for StagingFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.0) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(file = %self.0.display(), error = %e, "failed to remove staging file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document {
            html: "<h1>Jane Doe</h1>".into(),
        }
    }

    #[tokio::test]
    async fn test_missing_executable_is_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChromiumRenderer::new(ChromiumConfig {
            executable: dir.path().join("no-such-browser"),
            args: vec![],
        });

        let output = dir.path().join("Jane_Doe_certificate.pdf");
        let err = renderer.render(&doc(), &output).await.unwrap_err();

        assert!(matches!(err, RenderError::Backend(_)));
        // Staging file is cleaned up even on failure
        assert!(!output.with_extension("staging.html").exists());
    }

    #[cfg(unix)]
    fn fake_browser(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-chromium");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fake_browser_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let browser = fake_browser(
            dir.path(),
            r#"for arg in "$@"; do
  case "$arg" in
    --print-to-pdf=*) printf '%%PDF-1.4 fake' > "${arg#--print-to-pdf=}" ;;
  esac
done"#,
        );
        let renderer = ChromiumRenderer::new(ChromiumConfig {
            executable: browser,
            args: vec![],
        });

        let output = dir.path().join("Jane_Doe_certificate.pdf");
        renderer.render(&doc(), &output).await.unwrap();

        assert!(std::fs::read_to_string(&output).unwrap().starts_with("%PDF"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_browser_crash_is_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let browser = fake_browser(dir.path(), "echo 'renderer crashed' >&2\nexit 3");
        let renderer = ChromiumRenderer::new(ChromiumConfig {
            executable: browser,
            args: vec![],
        });

        let output = dir.path().join("Jane_Doe_certificate.pdf");
        match renderer.render(&doc(), &output).await {
            Err(RenderError::Backend(msg)) => assert!(msg.contains("renderer crashed")),
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_timeout_kills_hung_browser() {
        use crate::renderer::render_with_timeout;
        use std::time::{Duration, Instant};

        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("browser.pid");
        let browser = fake_browser(
            dir.path(),
            &format!("echo $$ > '{}'\nexec sleep 60", pid_file.display()),
        );
        let renderer = ChromiumRenderer::new(ChromiumConfig {
            executable: browser,
            args: vec![],
        });

        let output = dir.path().join("Jane_Doe_certificate.pdf");
        let started = Instant::now();
        let err = render_with_timeout(&renderer, &doc(), &output, Duration::from_millis(500))
            .await
            .unwrap_err();

        assert!(matches!(err, RenderError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!output.with_extension("staging.html").exists());

        // The killed process is gone or left only as a zombie awaiting reaping
        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let stat = format!("/proc/{}/stat", pid.trim());
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match std::fs::read_to_string(&stat) {
                Err(_) => break,
                Ok(line) if line.contains(") Z ") => break,
                Ok(_) if Instant::now() > deadline => panic!("browser {} still running", pid),
                Ok(_) => tokio::time::sleep(Duration::from_millis(20)).await,
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = ChromiumConfig::default();
        assert_eq!(config.executable, PathBuf::from("chromium"));
        assert!(config.args.iter().any(|a| a == "--no-sandbox"));
    }
}
