//! Record schemas: the three entity types, their collections and field rules.
//!
//! Rules are checked against the raw JSON body (see [`crate::service::RequestValidator`]) so a
//! client gets a message naming the offending field; the typed record is decoded afterwards.

mod records;
mod web_url;

pub use records::{Company, PlacedStudent, TeamMember};
pub use web_url::{UrlError, WebUrl, MAX_URL_LENGTH};

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    TextList,
    Url,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub minimum: Option<i64>,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        FieldRule {
            name,
            kind,
            required: true,
            minimum: None,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        FieldRule {
            name,
            kind,
            required: false,
            minimum: None,
        }
    }

    pub const fn at_least(mut self, min: i64) -> Self {
        self.minimum = Some(min);
        self
    }
}

/// An entity persisted as one document per record in its own collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn rules() -> &'static [FieldRule];
}

/// Collections backing the three entity kinds.
pub const COLLECTIONS: [&str; 3] = [PlacedStudent::COLLECTION, Company::COLLECTION, TeamMember::COLLECTION];
