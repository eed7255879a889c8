//! Result text classification
//!
//! The portal only tells us what happened through the wording of the result
//! panel. Every phrase we rely on lives here.

use crate::models::search_result::Availability;

/// Phrases meaning the plate is gone. Checked first: "not available" contains
/// "available".
const UNAVAILABLE_PHRASES: &[&str] = &["not available", "unavailable"];
const TAKEN_PHRASES: &[&str] = &["already taken", "taken"];
const AVAILABLE_PHRASES: &[&str] = &["congratulations", "available"];

/// Classify the raw result text, case-insensitively, first match wins
pub fn classify(raw_text: &str) -> Availability {
    let text = raw_text.to_lowercase();
    let contains_any = |phrases: &[&str]| phrases.iter().any(|p| text.contains(p));

    if contains_any(UNAVAILABLE_PHRASES) || contains_any(TAKEN_PHRASES) {
        Availability::Unavailable
    } else if contains_any(AVAILABLE_PHRASES) {
        Availability::Available
    } else {
        Availability::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_phrasing_beats_available() {
        assert_eq!(
            classify("Sorry, ABC123 is not available"),
            Availability::Unavailable
        );
        assert_eq!(
            classify("ABC123 is NOT available for purchase"),
            Availability::Unavailable
        );
        assert_eq!(classify("This combination is unavailable"), Availability::Unavailable);
    }

    #[test]
    fn taken_is_unavailable() {
        assert_eq!(classify("ABC123 is already taken"), Availability::Unavailable);
        assert_eq!(classify("Taken"), Availability::Unavailable);
    }

    #[test]
    fn congratulations_is_available() {
        assert_eq!(
            classify("Congratulations! ABC123 is available"),
            Availability::Available
        );
        assert_eq!(classify("CONGRATULATIONS"), Availability::Available);
    }

    #[test]
    fn taken_wins_even_with_congratulations() {
        assert_eq!(
            classify("Congratulations on choosing, but this one is taken"),
            Availability::Unavailable
        );
    }

    #[test]
    fn unrecognised_text_is_unknown() {
        assert_eq!(classify("System busy, try later"), Availability::Unknown);
        assert_eq!(classify(""), Availability::Unknown);
    }

    #[test]
    fn classification_is_repeatable() {
        let text = "Congratulations! EZYPLTE is available";
        assert_eq!(classify(text), classify(text));
    }
}
