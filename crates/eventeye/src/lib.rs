//! # EventEye
//!
//! Issue verifiable certificates to event participants, and verify them by
//! token.
//!
//! ## Overview
//!
//! For every participant the [`Issuer`]:
//!
//! 1. mints a random [`VerificationToken`](core::VerificationToken)
//! 2. builds `<base_url>/verify/<token>` and encodes it as a QR image
//! 3. fills the HTML certificate template and renders the artifact
//! 4. registers the token against the participant and event
//!
//! A token is registered only after its artifact has been written, so every
//! registered token points at a real certificate. Anyone holding the URL can
//! later call [`Issuer::verify`] to confirm who the certificate was issued to.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use eventeye::{Issuer, IssuerConfig};
//! use eventeye::core::{Event, Participant};
//! use eventeye::registry::SqliteRegistry;
//!
//! async fn example() -> eventeye::Result<()> {
//!     let registry = SqliteRegistry::open("certificates.db")?;
//!     let issuer = Issuer::with_chromium(registry, IssuerConfig::default());
//!
//!     let event = Event::new("Hackathon 2025", "2025-10-10", "EventEye");
//!     let manifest = issuer
//!         .issue_for_event(&event, vec![Participant::new("Jane Doe", "jane@x.com")])
//!         .await?;
//!
//!     for (entry, issued) in manifest.issued() {
//!         println!("{} -> {}", entry.participant_name, issued.verify_url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `eventeye::core` - Records, tokens and naming rules
//! - `eventeye::registry` - Verification registry backends
//! - `eventeye::render` - Templates, QR codes and renderers

mod batch;
pub mod config;
pub mod error;
pub mod issuer;
pub mod manifest;
pub mod verify;

// Re-export component crates
pub use eventeye_core as core;
pub use eventeye_registry as registry;
pub use eventeye_render as render;

// Re-export main types for convenience
pub use config::{ArtifactLayout, IssuerConfig};
pub use error::{IssueError, IssueFailure, Result};
pub use issuer::Issuer;
pub use manifest::{Issued, Manifest, ManifestEntry, Outcome};
pub use verify::{verify, Verification};
