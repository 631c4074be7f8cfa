//! Identifier humanizer.
//!
//! Backend validation errors often surface as bare PascalCase type names
//! (`ChannelExpiryBlocksTooHighInCreateOrderRequest`). When nothing in the
//! condition table recognizes one, splitting it into words is still far more
//! readable than the raw token.
//!
//! # Shape Requirements
//!
//! - No whitespace
//! - Every character alphanumeric
//! - At least one lowercase-to-uppercase boundary
//!
//! `SCREAMING_CASE`, single words and anything with punctuation are left alone.

use smallvec::SmallVec;

/// Split a camel/Pascal-case identifier into a sentence.
///
/// Returns `None` when `text` is not identifier-shaped.
///
/// ```rust
/// use friendly_errors::humanize::humanize_identifier;
///
/// assert_eq!(
///     humanize_identifier("ChannelExpiryBlocksTooHighInCreateOrderRequest").as_deref(),
///     Some("Channel expiry blocks too high in create order request")
/// );
/// assert_eq!(humanize_identifier("Payment timed out"), None);
/// assert_eq!(humanize_identifier("FAILURE_REASON_ERROR"), None);
/// ```
pub fn humanize_identifier(text: &str) -> Option<String> {
    if text.is_empty() || !text.chars().all(char::is_alphanumeric) {
        return None;
    }

    let fragments = split_at_case_boundaries(text);
    if fragments.len() < 2 {
        return None;
    }

    let mut out = String::with_capacity(text.len() + fragments.len());
    for (i, fragment) in fragments.iter().enumerate() {
        if i == 0 {
            let mut chars = fragment.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(&chars.as_str().to_lowercase());
            }
        } else {
            out.push(' ');
            out.push_str(&fragment.to_lowercase());
        }
    }
    Some(out)
}

/// Borrowed fragments, split wherever a lowercase char is followed by an
/// uppercase one.
fn split_at_case_boundaries(text: &str) -> SmallVec<[&str; 8]> {
    let mut fragments = SmallVec::new();
    let mut start = 0;
    let mut prev_lower = false;

    for (idx, c) in text.char_indices() {
        if prev_lower && c.is_uppercase() {
            fragments.push(&text[start..idx]);
            start = idx;
        }
        prev_lower = c.is_lowercase();
    }
    fragments.push(&text[start..]);
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_is_split() {
        assert_eq!(
            humanize_identifier("ChannelExpiryBlocksTooHighInCreateOrderRequest").unwrap(),
            "Channel expiry blocks too high in create order request"
        );
    }

    #[test]
    fn camel_case_first_word_is_capitalized() {
        assert_eq!(humanize_identifier("invalidAmount").unwrap(), "Invalid amount");
    }

    #[test]
    fn acronym_runs_stay_attached() {
        // Only lower->upper boundaries split; "HTLCs" stays one fragment.
        assert_eq!(
            humanize_identifier("TooManyHTLCsPending").unwrap(),
            "Too many htlcs pending"
        );
    }

    #[test]
    fn digits_do_not_create_boundaries() {
        assert_eq!(humanize_identifier("Bolt11Invalid"), None);
        assert_eq!(humanize_identifier("Bolt11InvoiceExpired").unwrap(), "Bolt11invoice expired");
    }

    #[test]
    fn non_identifier_shapes_are_rejected() {
        assert_eq!(humanize_identifier(""), None);
        assert_eq!(humanize_identifier("Error"), None);
        assert_eq!(humanize_identifier("Random message"), None);
        assert_eq!(humanize_identifier("FAILURE_REASON_ERROR"), None);
        assert_eq!(humanize_identifier("NotFound: channel"), None);
        assert_eq!(humanize_identifier("ALLCAPS"), None);
    }

    #[test]
    fn output_is_not_reprocessed() {
        let once = humanize_identifier("InvoiceAlreadyPaid").unwrap();
        assert_eq!(humanize_identifier(&once), None);
    }

    #[test]
    fn non_ascii_letters_are_handled() {
        assert_eq!(humanize_identifier("ÉchecDePaiement").unwrap(), "Échec de paiement");
    }
}
