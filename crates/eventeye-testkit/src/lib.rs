//! # EventEye Testkit
//!
//! Testing utilities for EventEye.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: A scratch directory with a certificate template and
//!   sample records
//! - **Renderers**: Test doubles for the [`Renderer`](eventeye_render::Renderer)
//!   seam that succeed, fail, or hang on demand
//! - **Registries**: [`Registry`](eventeye_registry::Registry) wrappers that
//!   fail on a chosen call
//! - **Generators**: Proptest strategies for participants and events
//!
//! ## Test Fixtures
//!
//! ```rust
//! use eventeye_testkit::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let event = fixture.event();
//! let jane = fixture.participant("Jane Doe");
//! assert!(fixture.template_path().exists());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use eventeye_testkit::generators::participant_name;
//!
//! proptest! {
//!     #[test]
//!     fn file_names_are_safe(name in participant_name()) {
//!         let file = eventeye_core::artifact_file_name(&name, "pdf");
//!         prop_assert!(!file.contains('/'));
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod registries;
pub mod renderers;

pub use fixtures::{TestFixture, DEFAULT_TEMPLATE};
pub use registries::{DuplicatingRegistry, FlakyRegistry};
pub use renderers::{FailingRenderer, HangingRenderer, StubRenderer};
