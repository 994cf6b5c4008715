//! Document store abstraction: schema-less JSON documents grouped in named collections.
//!
//! Backends implement [`DocumentStore`]. Every stored document carries a store-assigned
//! [`DocumentId`] under [`ID_FIELD`]; callers never supply it.

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::{ensure_database_exists, PgDocumentStore};

use crate::error::StorageError;
use async_trait::async_trait;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::OnceLock;

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

/// Internal identifier field on raw documents returned by [`DocumentStore::find`].
pub const ID_FIELD: &str = "_id";

/// Store-assigned document identifier: 4-byte creation second followed by 8 random bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DocumentId([u8; 12]);

impl DocumentId {
    pub fn new() -> Self {
        let secs = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..].copy_from_slice(&random_bytes(&uuid::Uuid::new_v4()));
        DocumentId(bytes)
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Eight fully random bytes of a v4 UUID. Byte 6 holds the version nibble and byte 8 the
/// variant bits, so both are skipped.
fn random_bytes(u: &uuid::Uuid) -> [u8; 8] {
    let b = u.as_bytes();
    [b[0], b[1], b[2], b[3], b[4], b[5], b[9], b[10]]
}

/// Equality filter: every listed field must equal the given JSON value exactly.
/// An empty filter matches every document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter(Vec<(String, Value)>);

impl Filter {
    pub fn new() -> Self {
        Filter(Vec::new())
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push((field.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.0
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.0.iter().all(|(k, v)| doc.get(k) == Some(v))
    }
}

/// Persistence backend for documents. Implementations are shared across requests,
/// so they must be `Send + Sync` and hold no per-request state.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document into `collection`, returning its new id.
    /// Unknown collections are created on first insert.
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<DocumentId, StorageError>;

    /// Up to `limit` documents matching `filter`, in natural order. Each carries
    /// [`ID_FIELD`] as a string. An unknown collection yields an empty list.
    async fn find(&self, collection: &str, filter: &Filter, limit: u64) -> Result<Vec<Document>, StorageError>;

    /// Names of all collections, sorted.
    async fn collection_names(&self) -> Result<Vec<String>, StorageError>;

    /// Round-trip to the backend.
    async fn ping(&self) -> Result<(), StorageError>;

    /// Name of the database (or namespace) holding the collections.
    fn database_name(&self) -> &str;
}

/// Collection names become table names, so only lowercase identifiers are allowed.
pub fn validate_collection_name(name: &str) -> Result<(), StorageError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[a-z_][a-z0-9_]{0,62}$").expect("static pattern"));
    if re.is_match(name) {
        Ok(())
    } else {
        Err(StorageError::InvalidCollection(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_id_is_24_lower_hex() {
        let id = DocumentId::new().to_string();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn random_part_skips_version_and_variant_bytes() {
        let mut raw = [0u8; 16];
        for (i, b) in raw.iter_mut().enumerate() {
            *b = i as u8;
        }
        let u = uuid::Uuid::from_bytes(raw);
        assert_eq!(random_bytes(&u), [0, 1, 2, 3, 4, 5, 9, 10]);
    }

    #[test]
    fn ids_are_distinct() {
        assert_ne!(DocumentId::new(), DocumentId::new());
    }

    #[test]
    fn empty_filter_matches_everything() {
        let doc = json!({"year": 2024}).as_object().cloned().unwrap();
        assert!(Filter::new().matches(&doc));
        assert!(Filter::new().matches(&Document::new()));
    }

    #[test]
    fn filter_is_exact_equality() {
        let doc = json!({"year": 2024, "name": "A"}).as_object().cloned().unwrap();
        assert!(Filter::new().eq("year", 2024).matches(&doc));
        assert!(!Filter::new().eq("year", 2023).matches(&doc));
        assert!(!Filter::new().eq("year", "2024").matches(&doc));
        assert!(!Filter::new().eq("missing", 1).matches(&doc));
    }

    #[test]
    fn collection_names_are_identifiers() {
        assert!(validate_collection_name("studentplaced").is_ok());
        assert!(validate_collection_name("team_member2").is_ok());
        assert!(validate_collection_name("Company").is_err());
        assert!(validate_collection_name("x; DROP TABLE y").is_err());
        assert!(validate_collection_name("").is_err());
    }
}
