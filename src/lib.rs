//! TPO Portal: REST backend for placed students, companies and the placement team,
//! stored as documents in named collections.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, StorageError};
pub use routes::{app_router, common_routes, entity_routes};
pub use schema::{Company, PlacedStudent, Record, TeamMember, COLLECTIONS};
pub use service::CrudService;
pub use state::AppState;
pub use store::{ensure_database_exists, DocumentId, DocumentStore, Filter, MemoryDocumentStore, PgDocumentStore};
