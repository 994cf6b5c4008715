//! In-memory document store for tests and ephemeral runs.
//!
//! Collections are insertion-ordered vectors behind a `RwLock`. Data is lost when the
//! store is dropped.

use super::{validate_collection_name, Document, DocumentId, DocumentStore, Filter, ID_FIELD};
use crate::error::StorageError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Debug)]
pub struct MemoryDocumentStore {
    name: String,
    collections: RwLock<BTreeMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::with_name("memory")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of documents in `collection` (0 when it does not exist).
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Unavailable(format!("lock poisoned: {e}"))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(&self, collection: &str, mut doc: Document) -> Result<DocumentId, StorageError> {
        validate_collection_name(collection)?;
        let id = DocumentId::new();
        doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        let mut collections = self.collections.write().map_err(poisoned)?;
        collections.entry(collection.to_string()).or_default().push(doc);
        Ok(id)
    }

    async fn find(&self, collection: &str, filter: &Filter, limit: u64) -> Result<Vec<Document>, StorageError> {
        validate_collection_name(collection)?;
        let collections = self.collections.read().map_err(poisoned)?;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(docs
            .iter()
            .filter(|d| filter.matches(d))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn collection_names(&self) -> Result<Vec<String>, StorageError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.keys().cloned().collect())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.collections.read().map(|_| ()).map_err(poisoned)
    }

    fn database_name(&self) -> &str {
        &self.name
    }
}
