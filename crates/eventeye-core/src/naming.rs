//! Artifact file naming and verification URLs.
//!
//! File names: `<sanitized-participant-name>_certificate.<ext>`, where every
//! character outside `[A-Za-z0-9_-]` is replaced by `_`.
//!
//! URLs: `<base>/verify/<token>`.

use crate::types::VerificationToken;

/// Suffix appended to the sanitized participant name.
pub const ARTIFACT_SUFFIX: &str = "_certificate";

/// Path segment under which tokens are verified.
pub const VERIFY_PATH: &str = "verify";

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
///
/// Works per Unicode scalar value, so `"Zoë"` becomes `"Zo_"`.
pub fn sanitize_file_segment(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// The artifact file name for a participant.
pub fn artifact_file_name(participant_name: &str, extension: &str) -> String {
    format!(
        "{}{}.{}",
        sanitize_file_segment(participant_name),
        ARTIFACT_SUFFIX,
        extension
    )
}

/// The verification URL embedded in a certificate.
///
/// Trailing slashes on `base_url` are ignored.
pub fn verify_url(base_url: &str, token: &VerificationToken) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), VERIFY_PATH, token)
}
