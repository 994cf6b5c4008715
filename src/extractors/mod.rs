//! Request extractors that reject with [`crate::error::AppError`].

mod list;
mod record;

pub use list::{Limited, ListParams, ListQuery, StudentListParams, DEFAULT_LIMIT};
pub use record::ValidRecord;
