//! Data model for academic records
//!
//! A record is an opaque field → value map; which fields exist for a given
//! category is described by its schema, not by this type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved field key for an attached document's URL
pub const DOCUMENT_URL_KEY: &str = "document_url";
/// Reserved field key for an attached document's display name
pub const DOCUMENT_NAME_KEY: &str = "document_name";

/// Descriptor handed to an external document viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub url: String,
    pub name: String,
}

/// One academic record (an award, a publication, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// RFC 3339 timestamps stamped by the store
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Record {
    pub fn new(id: u64, fields: BTreeMap<String, String>) -> Self {
        Self {
            id,
            fields,
            created_at: None,
            updated_at: None,
        }
    }

    /// Look up a field value; missing keys are simply `None`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: String) {
        self.fields.insert(key.to_string(), value);
    }

    /// The attached document, when both reserved keys are non-empty
    pub fn document(&self) -> Option<DocumentRef> {
        let url = self.get(DOCUMENT_URL_KEY)?.trim();
        if url.is_empty() {
            return None;
        }
        let name = self
            .get(DOCUMENT_NAME_KEY)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(url);
        Some(DocumentRef {
            url: url.to_string(),
            name: name.to_string(),
        })
    }

    /// Case-insensitive substring match over every field value
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.fields
            .values()
            .any(|v| v.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        Record::new(
            1,
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_get_missing_field() {
        let r = record(&[("title", "Best Paper Award")]);
        assert_eq!(r.get("title"), Some("Best Paper Award"));
        assert_eq!(r.get("agency"), None);
    }

    #[test]
    fn test_matches_query_any_field() {
        let r = record(&[("title", "Deep Learning Survey"), ("journal", "IEEE Access")]);
        assert!(r.matches_query("ieee"));
        assert!(r.matches_query("SURVEY"));
        assert!(!r.matches_query("nature"));
        assert!(r.matches_query(""));
    }

    #[test]
    fn test_document_requires_url() {
        let r = record(&[("document_name", "certificate.pdf")]);
        assert!(r.document().is_none());

        let r = record(&[
            ("document_url", "https://docs.example.edu/cert.pdf"),
            ("document_name", "certificate.pdf"),
        ]);
        let doc = r.document().unwrap();
        assert_eq!(doc.name, "certificate.pdf");

        // Name falls back to the URL
        let r = record(&[("document_url", "https://docs.example.edu/cert.pdf")]);
        assert_eq!(r.document().unwrap().name, "https://docs.example.edu/cert.pdf");
    }

    #[test]
    fn test_serde_round_trip() {
        let mut r = record(&[("title", "Invited Talk"), ("year", "2024")]);
        r.created_at = Some("2024-06-01T10:00:00+05:30".to_string());
        let json = serde_json::to_string(&r).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, r.id);
        assert_eq!(back.get("year"), Some("2024"));
        assert_eq!(back.created_at, r.created_at);
    }
}
