//! Builds parameterized DDL and queries for document tables. One table per collection:
//! `_id TEXT PRIMARY KEY, doc JSONB, created_at TIMESTAMPTZ`.

use super::params::DocParam;
use crate::store::{DocumentId, Filter};
use serde_json::Value;

/// Quote identifier for PostgreSQL. Names reaching here are validated collection names or the configured schema.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, collection: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(collection))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<DocParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: DocParam) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

pub fn create_schema(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema))
}

pub fn create_collection(schema: &str, collection: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            _id TEXT PRIMARY KEY,
            doc JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        qualified_table(schema, collection)
    )
}

pub fn insert_document(schema: &str, collection: &str, id: &DocumentId, doc: Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let id_n = q.push_param(DocParam::Text(id.to_string()));
    let doc_n = q.push_param(DocParam::Jsonb(doc));
    q.sql = format!(
        "INSERT INTO {} (_id, doc) VALUES (${}, ${})",
        qualified_table(schema, collection),
        id_n,
        doc_n
    );
    q
}

/// SELECT with equality filter on top-level document fields and a row limit. No ORDER BY:
/// rows come back in the table's natural order.
pub fn select_documents(schema: &str, collection: &str, filter: &Filter, limit: u64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut conditions = Vec::with_capacity(filter.fields().len());
    for (field, value) in filter.fields() {
        let k = q.push_param(DocParam::Text(field.clone()));
        let v = q.push_param(DocParam::Jsonb(value.clone()));
        conditions.push(format!("doc -> ${} = ${}", k, v));
    }
    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    let limit_n = q.push_param(DocParam::BigInt(i64::try_from(limit).unwrap_or(i64::MAX)));
    q.sql = format!(
        "SELECT _id, doc FROM {}{} LIMIT ${}",
        qualified_table(schema, collection),
        where_clause,
        limit_n
    );
    q
}

pub fn select_collection_names(schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(DocParam::Text(schema.to_string()));
    q.sql = format!(
        "SELECT table_name::text FROM information_schema.tables WHERE table_schema = ${} ORDER BY table_name",
        n
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_without_filter_has_no_where() {
        let q = select_documents("portal", "company", &Filter::new(), 50);
        assert_eq!(q.sql, r#"SELECT _id, doc FROM "portal"."company" LIMIT $1"#);
        assert!(matches!(q.params.as_slice(), [DocParam::BigInt(50)]));
    }

    #[test]
    fn select_with_filter_binds_field_and_value() {
        let q = select_documents("portal", "studentplaced", &Filter::new().eq("year", 2024), 10);
        assert_eq!(
            q.sql,
            r#"SELECT _id, doc FROM "portal"."studentplaced" WHERE doc -> $1 = $2 LIMIT $3"#
        );
        match q.params.as_slice() {
            [DocParam::Text(k), DocParam::Jsonb(v), DocParam::BigInt(10)] => {
                assert_eq!(k, "year");
                assert_eq!(v, &json!(2024));
            }
            other => panic!("unexpected params: {:?}", other),
        }
    }

    #[test]
    fn huge_limit_saturates() {
        let q = select_documents("portal", "company", &Filter::new(), u64::MAX);
        assert!(matches!(q.params.as_slice(), [DocParam::BigInt(i64::MAX)]));
    }

    #[test]
    fn insert_binds_id_then_doc() {
        let id = DocumentId::new();
        let q = insert_document("portal", "teammember", &id, json!({"name": "A"}));
        assert_eq!(q.sql, r#"INSERT INTO "portal"."teammember" (_id, doc) VALUES ($1, $2)"#);
        assert!(matches!(&q.params[0], DocParam::Text(s) if *s == id.to_string()));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(qualified_table("we\"ird", "c"), r#""we""ird"."c""#);
        assert!(create_collection("portal", "company").contains(r#""portal"."company""#));
    }
}
