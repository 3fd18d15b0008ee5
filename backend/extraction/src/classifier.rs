//! Document text classifier: PAN vs Aadhar from raw OCR tokens.
//!
//! The PAN test is a strict full-token match while the Aadhar test is
//! a loose substring scan, and the *last* three digit-bearing tokens
//! win for Aadhar. Both asymmetries are the observed contract of the
//! upstream card formats as they come back from OCR and must not be
//! "fixed".

use ekyc_core::{DocumentMatch, TokenCollection};
use once_cell::sync::Lazy;
use regex::Regex;

/// Full-token PAN format: 5 letters, 4 digits, 1 letter.
static PAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{5}[0-9]{4}[A-Za-z]$").unwrap());

/// A run of four consecutive digits, anywhere in a token.
static FOUR_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// Classify a token collection into a PAN match, an Aadhar match, or
/// `Unrecognized`.
///
/// Pure and stateless; safe to call concurrently. The first token
/// matching the anchored PAN pattern wins, so when the provider emits
/// tokens in a different order the winner can change: scan order is
/// collection order, not reading order.
pub fn classify(tokens: &TokenCollection) -> DocumentMatch {
    if tokens.is_empty() {
        return DocumentMatch::Unrecognized;
    }

    for token in tokens {
        if PAN_RE.is_match(token) {
            return DocumentMatch::Pan { value: token.clone() };
        }
    }

    // Not a PAN card; gather every token carrying a 4-digit run and
    // keep their relative order.
    let digit_bearing: Vec<&str> = tokens
        .iter()
        .filter(|t| FOUR_DIGITS_RE.is_match(t))
        .map(|t| t.as_str())
        .collect();

    if digit_bearing.len() < 3 {
        return DocumentMatch::Unrecognized;
    }

    let last_three = &digit_bearing[digit_bearing.len() - 3..];
    DocumentMatch::Aadhar { value: last_three.join(" ") }
}
