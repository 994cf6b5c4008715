//! Typed bind values for document queries.

use serde_json::Value;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value bound to a document query. Each variant binds with its native PostgreSQL type.
#[derive(Clone, Debug)]
pub enum DocParam {
    Text(String),
    BigInt(i64),
    Jsonb(Value),
}

/// Bind every param in order.
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[DocParam],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p {
            DocParam::Text(s) => query.bind(s.clone()),
            DocParam::BigInt(n) => query.bind(*n),
            DocParam::Jsonb(v) => query.bind(sqlx::types::Json(v.clone())),
        };
    }
    query
}
