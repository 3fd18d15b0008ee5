use serde::{Deserialize, Serialize};

use crate::document::DocumentMatch;

/// Insertion-ordered record of the fields collected across a dialog.
///
/// Order matters: the exported spreadsheet writes one column per field
/// in the order the dialog collected them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    fields: Vec<(String, String)>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing an existing value in place so the
    /// field's column position is stable across updates.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge a classification outcome into the record.
    ///
    /// The raw identifier lands under "PAN" or "Aadhar"; an
    /// unrecognized outcome writes nothing.
    pub fn record_document(&mut self, doc: &DocumentMatch) {
        match doc {
            DocumentMatch::Pan { value } => self.set("PAN", value.clone()),
            DocumentMatch::Aadhar { value } => self.set("Aadhar", value.clone()),
            DocumentMatch::Unrecognized => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_preserves_insertion_order() {
        let mut record = FieldRecord::new();
        record.set("Name", "Asha");
        record.set("Email", "asha@example.com");
        record.set("Name", "Asha R");

        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Name", "Email"]);
        assert_eq!(record.get("Name"), Some("Asha R"));
    }

    #[test]
    fn record_document_stores_raw_identifier() {
        let mut record = FieldRecord::new();
        record.record_document(&DocumentMatch::Pan { value: "ABCDE1234F".into() });
        assert_eq!(record.get("PAN"), Some("ABCDE1234F"));

        record.record_document(&DocumentMatch::Aadhar { value: "1111 2222 3333".into() });
        assert_eq!(record.get("Aadhar"), Some("1111 2222 3333"));
    }

    #[test]
    fn unrecognized_writes_nothing() {
        let mut record = FieldRecord::new();
        record.record_document(&DocumentMatch::Unrecognized);
        assert!(record.is_empty());
    }
}
