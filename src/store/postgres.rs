//! PostgreSQL document store. Each collection is a JSONB table inside one schema
//! (from `PORTAL_SCHEMA`, default `portal`).

use super::{validate_collection_name, Document, DocumentId, DocumentStore, Filter, ID_FIELD};
use crate::error::StorageError;
use crate::sql::{self, bind_all, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use sqlx::Row;
use std::str::FromStr;

/// SQLSTATE for "relation does not exist".
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
    schema: String,
    database: String,
}

impl PgDocumentStore {
    /// Wrap an existing pool. `database_url` is only used to report the database name.
    pub fn new(pool: PgPool, schema: impl Into<String>, database_url: &str) -> Self {
        let database = parse_db_name_from_url(database_url)
            .map(|(_, name)| name)
            .unwrap_or_default();
        Self {
            pool,
            schema: schema.into(),
            database,
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Create the schema and one table per collection if they do not exist.
    pub async fn ensure_collections(&self, collections: &[&str]) -> Result<(), StorageError> {
        sqlx::query(&sql::create_schema(&self.schema))
            .execute(&self.pool)
            .await?;
        for collection in collections {
            self.ensure_collection(collection).await?;
        }
        Ok(())
    }

    async fn ensure_collection(&self, collection: &str) -> Result<(), StorageError> {
        validate_collection_name(collection)?;
        let ddl = sql::create_collection(&self.schema, collection);
        tracing::debug!(collection = %collection, "ensure collection");
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    async fn execute(&self, q: &QueryBuf) -> Result<(), StorageError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        bind_all(sqlx::query(&q.sql), &q.params)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn is_undefined_table(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|d| d.code())
        .map(|c| c == UNDEFINED_TABLE)
        .unwrap_or(false)
}

fn row_to_document(row: &sqlx::postgres::PgRow) -> Result<Document, StorageError> {
    let id: String = row.try_get("_id")?;
    let doc: sqlx::types::Json<Value> = row.try_get("doc")?;
    into_document(id, doc.0)
}

/// Stored `doc` values are always objects; anything else means the table was written by
/// something other than this store.
fn into_document(id: String, doc: Value) -> Result<Document, StorageError> {
    let Value::Object(mut map) = doc else {
        return Err(StorageError::Serialize(serde::de::Error::custom(format!(
            "document {id} is not a JSON object"
        ))));
    };
    map.insert(ID_FIELD.to_string(), Value::String(id));
    Ok(map)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<DocumentId, StorageError> {
        validate_collection_name(collection)?;
        let id = DocumentId::new();
        let q = sql::insert_document(&self.schema, collection, &id, Value::Object(doc));
        match self.execute(&q).await {
            Err(StorageError::Db(e)) if is_undefined_table(&e) => {
                self.ensure_collection(collection).await?;
                self.execute(&q).await?;
            }
            other => other?,
        }
        Ok(id)
    }

    async fn find(&self, collection: &str, filter: &Filter, limit: u64) -> Result<Vec<Document>, StorageError> {
        validate_collection_name(collection)?;
        let q = sql::select_documents(&self.schema, collection, filter, limit);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = match bind_all(sqlx::query(&q.sql), &q.params).fetch_all(&self.pool).await {
            Ok(rows) => rows,
            Err(e) if is_undefined_table(&e) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        rows.iter().map(row_to_document).collect()
    }

    async fn collection_names(&self) -> Result<Vec<String>, StorageError> {
        let q = sql::select_collection_names(&self.schema);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|r| r.try_get::<String, _>(0).map_err(StorageError::from))
            .collect()
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    fn database_name(&self) -> &str {
        &self.database
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StorageError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StorageError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| StorageError::Unavailable("DATABASE_URL: no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/tpo_portal").unwrap();
        assert_eq!(name, "tpo_portal");
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
    }

    #[test]
    fn strips_query_from_database_name() {
        let (_, name) = parse_db_name_from_url("postgres://localhost/tpo?sslmode=disable").unwrap();
        assert_eq!(name, "tpo");
    }

    #[test]
    fn url_without_path_is_an_error() {
        assert!(parse_db_name_from_url("postgres://localhost").is_err());
    }

    #[test]
    fn stored_object_gets_its_id() {
        let doc = into_document("abc".into(), serde_json::json!({"name": "A"})).unwrap();
        assert_eq!(doc[ID_FIELD], "abc");
        assert_eq!(doc["name"], "A");
    }

    #[test]
    fn stored_non_object_is_an_error() {
        let err = into_document("abc".into(), serde_json::json!([1, 2])).unwrap_err();
        assert!(matches!(err, StorageError::Serialize(_)));
        assert!(err.to_string().contains("document abc is not a JSON object"));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
