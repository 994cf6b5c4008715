//! Response bodies shared by the entity endpoints.

use crate::store::Document;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Body returned by every create endpoint.
#[derive(Serialize, ToSchema)]
pub struct CreatedId {
    /// Store-assigned identifier, 24 hex characters.
    pub id: String,
}

/// Body returned by every list endpoint.
#[derive(Serialize, ToSchema)]
pub struct Items {
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Document>,
}

pub fn created_id(id: String) -> (StatusCode, Json<CreatedId>) {
    (StatusCode::OK, Json(CreatedId { id }))
}

pub fn items(items: Vec<Document>) -> (StatusCode, Json<Items>) {
    (StatusCode::OK, Json(Items { items }))
}
