//! Service routes: liveness message, database diagnostics, OpenAPI document.

use crate::handlers::{root, test_database};
use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /, GET /test, GET /openapi.json.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(test_database))
        .route("/openapi.json", get(openapi))
        .with_state(state)
}
