//! The page shown when someone follows a certificate's verification link.

use minijinja::{context, AutoEscape, Environment};

use eventeye_core::VerificationRecord;

use crate::error::Result;

const VERIFIED: &str = "<h1>Certificate Verified</h1>
<p><b>Name:</b> {{ name }}</p>
<p><b>Event:</b> {{ event }}</p>
<p><b>Date:</b> {{ date }}</p>
<p><b>Organizer:</b> {{ organizer }}</p>";

const NOT_VERIFIED: &str = "<h1>Invalid or expired certificate</h1>";

/// Render the confirmation fragment for a lookup result.
///
/// `None` renders the "invalid or expired" message. All record fields are
/// HTML-escaped.
pub fn render_confirmation(record: Option<&VerificationRecord>) -> Result<String> {
    let Some(record) = record else {
        return Ok(NOT_VERIFIED.to_string());
    };

    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    let html = env.render_str(
        VERIFIED,
        context! {
            name => &record.participant_name,
            event => &record.event_name,
            date => &record.event_date,
            organizer => &record.organizer,
        },
    )?;
    Ok(html)
}
