use async_trait::async_trait;
use mongodb::bson::Document;
use thiserror::Error;

/// MongoDB-backed implementation used by the running service.
pub mod mongo;

#[cfg(test)]
pub mod memory;

pub use mongo::MongoStore;

/// Upper bound on the number of documents any listing returns.
pub const FIND_ALL_LIMIT: i64 = 1000;

/// The two flat collections the service writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    StatusChecks,
    ContactSubmissions,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::StatusChecks => "status_checks",
            Collection::ContactSubmissions => "contact_submissions",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// A driver-level I/O failure, as reported when the server cannot be reached.
#[cfg(test)]
pub(crate) fn connection_refused(detail: &str) -> StoreError {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, detail.to_string());
    StoreError::Database(mongodb::error::Error::from(io))
}

/// Append-only document storage shared by all request handlers.
///
/// Implementations never enforce uniqueness; record identifiers are random
/// UUIDs generated before insertion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a single document.
    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError>;

    /// Returns at most `limit` documents in insertion order, without the
    /// store-assigned `_id` key.
    async fn find_all(
        &self,
        collection: Collection,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError>;

    /// Round-trips to the store to confirm it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
