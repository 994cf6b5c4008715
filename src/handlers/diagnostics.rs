//! Liveness message and the database diagnostic report.

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// How many collection names the diagnostic lists.
pub const MAX_LISTED_COLLECTIONS: usize = 10;
/// Probe errors are cut to this many characters in the report.
pub const MAX_ERROR_CHARS: usize = 50;

#[derive(Serialize)]
pub struct RootBody {
    pub message: &'static str,
}

pub async fn root() -> Json<RootBody> {
    Json(RootBody {
        message: "TPO Portal Backend Running",
    })
}

#[derive(Debug, Serialize)]
pub struct Diagnostics {
    pub backend: &'static str,
    pub database: String,
    pub database_url: &'static str,
    pub database_name: Option<String>,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

fn truncate(err: impl ToString) -> String {
    err.to_string().chars().take(MAX_ERROR_CHARS).collect()
}

/// Probe the store and summarize. Failures are reported in the body, never as an error status.
pub async fn test_database(State(state): State<AppState>) -> Json<Diagnostics> {
    let store = state.store.as_ref();
    let mut report = Diagnostics {
        backend: "running",
        database: "not available".to_string(),
        database_url: if state.config.database_url.is_some() { "set" } else { "not set" },
        database_name: None,
        connection_status: "not connected",
        collections: Vec::new(),
    };

    if let Err(e) = store.ping().await {
        tracing::warn!(error = %e, "database ping failed");
        report.database = format!("error: {}", truncate(e));
        return Json(report);
    }
    report.database_name = Some(store.database_name().to_string());
    report.connection_status = "connected";

    match store.collection_names().await {
        Ok(mut names) => {
            names.truncate(MAX_LISTED_COLLECTIONS);
            report.collections = names;
            report.database = "connected & working".to_string();
        }
        Err(e) => {
            tracing::warn!(error = %e, "listing collections failed");
            report.database = format!("connected but error: {}", truncate(e));
        }
    }
    Json(report)
}
