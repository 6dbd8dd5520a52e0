//! Proptest generators for property-based testing.

use proptest::prelude::*;

use eventeye_core::{Event, Participant, VerificationToken, TOKEN_BYTES};

/// Generate a random token.
pub fn token() -> impl Strategy<Value = VerificationToken> {
    any::<[u8; TOKEN_BYTES]>().prop_map(VerificationToken::from_bytes)
}

/// Generate a plausible, non-blank participant name.
pub fn participant_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z .'-]{0,39}".prop_map(String::from)
}

/// Generate text with characters that are special in HTML and file paths.
pub fn hostile_text() -> impl Strategy<Value = String> {
    "[A-Za-z<>&\"'/\\\\. ]{1,40}"
        .prop_filter("must not be blank", |s| !s.trim().is_empty())
        .prop_map(String::from)
}

/// Generate an email address.
pub fn email() -> impl Strategy<Value = String> {
    "[a-z]{1,12}@[a-z]{1,8}\\.(org|com|dev)".prop_map(String::from)
}

/// Generate a participant, sometimes with a phone number.
pub fn participant() -> impl Strategy<Value = Participant> {
    (
        participant_name(),
        email(),
        proptest::option::of("\\+[0-9]{8,12}"),
    )
        .prop_map(|(name, email, phone)| Participant {
            name,
            email,
            phone,
        })
}

/// Generate a valid event.
pub fn event() -> impl Strategy<Value = Event> {
    (
        "[A-Za-z0-9][A-Za-z0-9 ]{0,29}",
        "20[0-9]{2}-(0[1-9]|1[0-2])-(0[1-9]|1[0-9]|2[0-8])",
        "[A-Za-z][A-Za-z ]{0,19}",
    )
        .prop_map(|(name, date, organizer)| Event::new(name, date, organizer))
}
