//! # EventEye Core
//!
//! Pure primitives for EventEye certificates: verification tokens,
//! participant/event/verification records, and artifact naming.
//!
//! This crate contains no I/O, no storage, no rendering.
//!
//! ## Key Types
//!
//! - [`VerificationToken`] - 128-bit random token, the sole key into the registry
//! - [`VerificationRecord`] - What a token resolves to
//! - [`Participant`] / [`Event`] - Caller-owned input records
//!
//! ## Naming
//!
//! Artifact file names and verification URLs are built by the [`naming`]
//! module so that every crate agrees on the layout.

pub mod error;
pub mod naming;
pub mod record;
pub mod types;
pub mod validation;

pub use error::{CoreError, ValidationError};
pub use naming::{artifact_file_name, sanitize_file_segment, verify_url, ARTIFACT_SUFFIX};
pub use record::{Event, Participant, VerificationRecord};
pub use types::{VerificationToken, TOKEN_BYTES, TOKEN_HEX_LEN};
pub use validation::{validate_event, validate_participant};

/// Get current time in milliseconds.
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
