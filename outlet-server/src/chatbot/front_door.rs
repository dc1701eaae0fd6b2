//! Conversational Front-Door
//!
//! Intercepts gratitude, greetings and farewells before the query
//! translator runs. 只有在问题不含任何意图关键词时才生效。

/// Markers that indicate a location/feature question; any hit defers the
/// message to the translator even when it also contains small talk.
const INTENT_MARKERS: &[&str] = &[
    "outlets", "stores", "locations", "find", "list", "which", "24 hour", "24-hour", "birthday",
    "parties", "mccafe", "wifi",
];

const GRATITUDE_PHRASES: &[&str] = &["thank you", "thanks", "appreciate it", "cheers"];
const GREETING_PHRASES: &[&str] = &["hi", "hello", "hey", "greetings"];
const FAREWELL_PHRASES: &[&str] = &["bye", "goodbye", "see you", "farewell"];

const GRATITUDE_REPLY: &str =
    "You're welcome! Happy to help with McDonald's locations and features.";
const GREETING_REPLY: &str = "Hello! I can help you find McDonald's locations and their features \
     (like McCafe, WiFi, etc.). What are you looking for?";
const FAREWELL_REPLY: &str =
    "Goodbye! Come back if you need more help finding McDonald's locations or their features.";

/// Canned reply for a purely conversational message (zero matches, empty
/// data payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationalReply {
    pub response: &'static str,
}

/// Return a canned reply when the question is conversational small talk.
///
/// `None` when the question carries location/feature intent or matches none
/// of the three phrase sets; the caller then falls through to the
/// translator.
pub fn classify(question: &str) -> Option<ConversationalReply> {
    let q = question.to_lowercase();
    let q = q.trim();

    if INTENT_MARKERS.iter().any(|marker| q.contains(marker)) {
        return None;
    }

    // Checked in fixed order: gratitude, greeting, farewell
    for (phrases, reply) in [
        (GRATITUDE_PHRASES, GRATITUDE_REPLY),
        (GREETING_PHRASES, GREETING_REPLY),
        (FAREWELL_PHRASES, FAREWELL_REPLY),
    ] {
        if phrases.iter().any(|phrase| q.contains(phrase)) {
            return Some(ConversationalReply { response: reply });
        }
    }

    None
}
