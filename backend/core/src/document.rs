use serde::{Deserialize, Serialize};

/// Raw text tokens recognized from one image, in provider discovery
/// order. The order is whatever the vision service produced and does
/// not reflect reading order on the card.
pub type TokenCollection = Vec<String>;

/// Outcome of classifying a token collection from one uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentMatch {
    /// A PAN card. `value` is the raw 10-character identifier.
    Pan { value: String },
    /// An Aadhar card. `value` is three 4-digit-bearing tokens joined
    /// by single spaces.
    Aadhar { value: String },
    /// No tokens, or nothing matched either pattern.
    Unrecognized,
}

impl DocumentMatch {
    /// Chat-facing announcement line for a recognized document.
    ///
    /// The label prefixes are part of the observable transcript
    /// ("PAN No is: ...", "Aadhar No is: ...") and stay verbatim.
    pub fn announcement(&self) -> Option<String> {
        match self {
            DocumentMatch::Pan { value } => Some(format!("PAN No is: {value}")),
            DocumentMatch::Aadhar { value } => Some(format!("Aadhar No is: {value}")),
            DocumentMatch::Unrecognized => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, DocumentMatch::Unrecognized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announcement_carries_legacy_labels() {
        let pan = DocumentMatch::Pan { value: "ABCDE1234F".into() };
        assert_eq!(pan.announcement().unwrap(), "PAN No is: ABCDE1234F");

        let aadhar = DocumentMatch::Aadhar { value: "1111 2222 3333".into() };
        assert_eq!(aadhar.announcement().unwrap(), "Aadhar No is: 1111 2222 3333");

        assert!(DocumentMatch::Unrecognized.announcement().is_none());
    }

    #[test]
    fn serde_roundtrip() {
        let doc = DocumentMatch::Pan { value: "ABCDE1234F".into() };
        let json = serde_json::to_string(&doc).unwrap();
        let back: DocumentMatch = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }
}
