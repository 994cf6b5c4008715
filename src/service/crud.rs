//! Generic create/list execution against any document store.

use crate::error::StorageError;
use crate::store::{Document, DocumentStore, Filter, ID_FIELD};
use serde::Serialize;
use serde_json::Value;

/// Field carrying the identifier in API responses.
pub const PUBLIC_ID_FIELD: &str = "id";

pub struct CrudService;

impl CrudService {
    /// Serialize `record` and insert it into `collection`. Returns the new id as a string.
    pub async fn create<S, R>(store: &S, collection: &str, record: &R) -> Result<String, StorageError>
    where
        S: DocumentStore + ?Sized,
        R: Serialize + Sync,
    {
        let doc = match serde_json::to_value(record)? {
            Value::Object(m) => m,
            other => {
                return Err(StorageError::Serialize(serde::ser::Error::custom(format!(
                    "record must serialize to an object, got {}",
                    other
                ))))
            }
        };
        let id = store.insert_one(collection, doc).await?;
        tracing::info!(collection = %collection, id = %id, "document created");
        Ok(id.to_string())
    }

    /// Up to `limit` raw documents from `collection` matching `filter`, in the store's natural order.
    pub async fn list<S>(store: &S, collection: &str, filter: &Filter, limit: u64) -> Result<Vec<Document>, StorageError>
    where
        S: DocumentStore + ?Sized,
    {
        let docs = store.find(collection, filter, limit).await?;
        tracing::debug!(collection = %collection, count = docs.len(), limit, "documents listed");
        Ok(docs)
    }

    /// Like [`CrudService::list`], with every document passed through [`normalize_id`].
    pub async fn list_normalized<S>(
        store: &S,
        collection: &str,
        filter: &Filter,
        limit: u64,
    ) -> Result<Vec<Document>, StorageError>
    where
        S: DocumentStore + ?Sized,
    {
        let docs = Self::list(store, collection, filter, limit).await?;
        Ok(docs.into_iter().map(normalize_id).collect())
    }
}

/// Replace the internal `_id` with a string `id`. Non-string ids are rendered as JSON text;
/// a missing id becomes an empty string.
pub fn normalize_id(mut doc: Document) -> Document {
    let id = match doc.remove(ID_FIELD) {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    doc.insert(PUBLIC_ID_FIELD.to_string(), Value::String(id));
    doc
}
