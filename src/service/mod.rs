//! CrudService: generic create/list over the document store, plus request validation.

mod crud;
mod validation;
pub use crud::{normalize_id, CrudService, PUBLIC_ID_FIELD};
pub use validation::RequestValidator;
