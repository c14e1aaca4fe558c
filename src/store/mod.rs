mod http;

pub use http::{HttpStore, StoreConfig};

use thiserror::Error;

use crate::domain::{EventPayload, EventRecord};

/// Failure of a remote store call. All variants are transient from the
/// core's point of view; the caller decides whether to retry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("http error: {0}")]
    Http(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Filters applied to a collection listing. Empty by default; the list
/// screen fetches the collection unfiltered and renders it in store
/// order.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub queries: Vec<String>,
}

/// The remote collection store the core writes events to and reads
/// them back from. Calls block for an unspecified time and may fail
/// transiently; the core performs no retries of its own.
pub trait CollectionStore {
    fn create(&self, collection: &str, payload: &EventPayload) -> Result<EventRecord, StoreError>;

    fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<EventRecord>, StoreError>;
}
