//! Extract a validated record from a JSON request body.

use crate::error::AppError;
use crate::schema::Record;
use crate::service::RequestValidator;
use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::Value;

/// A record whose body passed its field rules. Rejection happens before any handler code runs,
/// so an invalid payload never reaches the store.
#[derive(Clone, Debug)]
pub struct ValidRecord<R>(pub R);

#[async_trait]
impl<S, R> FromRequest<S> for ValidRecord<R>
where
    S: Send + Sync,
    R: Record,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        RequestValidator::parse(body).map(ValidRecord)
    }
}
