//! HTTP handlers for the entity endpoints and the service endpoints.

pub mod diagnostics;
pub mod entity;
pub use diagnostics::*;
pub use entity::*;
