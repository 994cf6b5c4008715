//! Query parameters for list endpoints.

use crate::error::AppError;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_LIMIT: i64 = 50;

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// `?limit=` for every list endpoint. No upper bound is applied.
#[derive(Clone, Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Maximum number of items (default 50)
    #[serde(default = "default_limit")]
    #[param(minimum = 0, default = 50)]
    pub limit: i64,
}

/// `?year=&limit=` for placed students.
#[derive(Clone, Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentListParams {
    /// Only students placed in this year
    pub year: Option<i64>,
    /// Maximum number of items (default 50)
    #[serde(default = "default_limit")]
    #[param(minimum = 0, default = 50)]
    pub limit: i64,
}

pub trait Limited {
    fn limit(&self) -> i64;
}

impl Limited for ListParams {
    fn limit(&self) -> i64 {
        self.limit
    }
}

impl Limited for StudentListParams {
    fn limit(&self) -> i64 {
        self.limit
    }
}

/// Parsed list query with a non-negative limit. Malformed values are a validation error.
#[derive(Clone, Debug)]
pub struct ListQuery<T> {
    pub params: T,
    pub limit: u64,
}

#[async_trait]
impl<S, T> FromRequestParts<S> for ListQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Limited + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        let limit = u64::try_from(params.limit())
            .map_err(|_| AppError::Validation(format!("limit must be non-negative, got {}", params.limit())))?;
        Ok(ListQuery { params, limit })
    }
}
