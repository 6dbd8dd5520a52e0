//! Input validation for events and participants.

use crate::error::ValidationError;
use crate::record::{Event, Participant};

/// Validate an event before a batch is started.
///
/// Every field is printed on the certificate, so none may be blank.
pub fn validate_event(event: &Event) -> Result<(), ValidationError> {
    if event.name.trim().is_empty() {
        return Err(ValidationError::EmptyEventField("name"));
    }
    if event.date.trim().is_empty() {
        return Err(ValidationError::EmptyEventField("date"));
    }
    if event.organizer.trim().is_empty() {
        return Err(ValidationError::EmptyEventField("organizer"));
    }
    Ok(())
}

/// Validate a participant before rendering their certificate.
///
/// A certificate without a name cannot be rendered. Email is not checked
/// here: delivery is a separate concern.
pub fn validate_participant(participant: &Participant) -> Result<(), ValidationError> {
    if participant.name.trim().is_empty() {
        return Err(ValidationError::EmptyParticipantName);
    }
    Ok(())
}
