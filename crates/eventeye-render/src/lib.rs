//! # EventEye Render
//!
//! Turns a participant, an event and a verification URL into a certificate
//! artifact on disk.
//!
//! ## Pipeline
//!
//! ```text
//! verify URL --QrImage::encode--> QR (SVG, data URI)
//!                                     |
//! Participant + Event ---------> CertificateFields
//!                                     |
//!                     CertificateTemplate::render (auto-escaped HTML)
//!                                     |
//!                     Renderer::render --> <name>_certificate.<ext>
//! ```
//!
//! ## Renderers
//!
//! - [`ChromiumRenderer`] - headless browser, prints A4 PDFs
//! - [`HtmlRenderer`] - writes the filled-in HTML as-is
//!
//! Renders are bounded with [`render_with_timeout`].
//!
//! The verification page shown to whoever scans the code is produced by
//! [`render_confirmation`].

pub mod chromium;
pub mod confirmation;
pub mod error;
pub mod html;
pub mod qr;
pub mod renderer;
pub mod template;

pub use chromium::{ChromiumConfig, ChromiumRenderer};
pub use confirmation::render_confirmation;
pub use error::{RenderError, Result};
pub use html::HtmlRenderer;
pub use qr::QrImage;
pub use renderer::{render_with_timeout, Renderer};
pub use template::{CertificateFields, CertificateTemplate, Document};
