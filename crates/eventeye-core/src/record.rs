//! Participant, event and verification records.
//!
//! Participants and events are owned by the caller and only read by the
//! issuance pipeline. A [`VerificationRecord`] is created once per issued
//! certificate and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// A certificate recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Participant {
    /// Create a participant without a phone number.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }

    /// Attach a phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// The event a batch of certificates is issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    /// Free-form date as entered by the organizer (e.g. `2025-10-10`).
    pub date: String,
    pub organizer: String,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        organizer: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            organizer: organizer.into(),
        }
    }
}

/// What a verification token resolves to.
///
/// `issued_at` is metadata (Unix ms); the four identity fields are what a
/// verifier is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub participant_name: String,
    pub event_name: String,
    pub event_date: String,
    pub organizer: String,
    pub issued_at: i64,
}

impl VerificationRecord {
    /// Build the record for one participant of an event.
    pub fn new(participant: &Participant, event: &Event, issued_at: i64) -> Self {
        Self {
            participant_name: participant.name.clone(),
            event_name: event.name.clone(),
            event_date: event.date.clone(),
            organizer: event.organizer.clone(),
            issued_at,
        }
    }

    /// True if both records certify the same participant at the same event,
    /// ignoring when they were issued.
    pub fn same_subject(&self, other: &Self) -> bool {
        self.participant_name == other.participant_name
            && self.event_name == other.event_name
            && self.event_date == other.event_date
            && self.organizer == other.organizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_copies_fields() {
        let event = Event::new("Hackathon 2025", "2025-10-10", "EventEye");
        let participant = Participant::new("Jane Doe", "jane@x.com");
        let record = VerificationRecord::new(&participant, &event, 42);

        assert_eq!(record.participant_name, "Jane Doe");
        assert_eq!(record.event_name, "Hackathon 2025");
        assert_eq!(record.event_date, "2025-10-10");
        assert_eq!(record.organizer, "EventEye");
        assert_eq!(record.issued_at, 42);
    }

    #[test]
    fn test_same_subject_ignores_issue_time() {
        let event = Event::new("Hackathon 2025", "2025-10-10", "EventEye");
        let participant = Participant::new("Jane Doe", "jane@x.com");
        let a = VerificationRecord::new(&participant, &event, 1);
        let b = VerificationRecord::new(&participant, &event, 2);

        assert_ne!(a, b);
        assert!(a.same_subject(&b));
    }

    #[test]
    fn test_participant_phone_is_optional_in_json() {
        let p: Participant =
            serde_json::from_str(r#"{"name":"Jane Doe","email":"jane@x.com"}"#).unwrap();
        assert_eq!(p.phone, None);

        let json = serde_json::to_string(&p.clone().with_phone("555-0100")).unwrap();
        assert!(json.contains("\"phone\":\"555-0100\""));
    }
}
