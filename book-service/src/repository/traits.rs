//! Persistence gateway trait
//!
//! The gateway is a document-store client: it accepts raw JSON documents and
//! returns typed entities. Methods use RPITIT (Return Position Impl Trait In
//! Traits), so implementations are plain `async fn`s without `async_trait`.
//!
//! Ids are passed through as the raw strings received from the client.
//! Parsing them is the store's job, and a malformed id is reported as a
//! [`RepositoryError`] like any other fault.

use std::future::Future;

use serde_json::Value;

use super::error::RepositoryError;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Raw document handed to the store on insert and update
pub type Document = Value;

/// Document-store contract consumed by the handler set
///
/// # Example
///
/// ```rust,ignore
/// impl Repository<Book> for MyStore {
///     async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Book>> {
///         // look the document up
///         todo!()
///     }
///     // ... other required methods
/// }
/// ```
pub trait Repository<Entity>: Send + Sync {
    /// Every document in the collection, in insertion order
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;

    /// Find a document by its identifier
    ///
    /// Returns `Ok(None)` when no document has this id.
    fn find_by_id(&self, id: &str)
        -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Insert a new document
    ///
    /// The store assigns the identifier and returns the stored entity.
    fn insert(&self, document: Document) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Apply `document` to the stored entity with this id
    ///
    /// Returns the post-update entity, or `Ok(None)` when the id is unknown.
    fn update_by_id(
        &self,
        id: &str,
        document: Document,
    ) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Remove the document with this id (hard delete)
    ///
    /// Returns the removed entity, or `Ok(None)` when the id is unknown.
    fn delete_by_id(&self, id: &str)
        -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Check that the store is reachable
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send {
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryOperation;

    struct EchoRepository;

    impl Repository<String> for EchoRepository {
        async fn find_all(&self) -> RepositoryResult<Vec<String>> {
            Ok(vec![])
        }

        async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<String>> {
            Ok(Some(id.to_string()))
        }

        async fn insert(&self, document: Document) -> RepositoryResult<String> {
            Ok(document.to_string())
        }

        async fn update_by_id(&self, _id: &str, _document: Document) -> RepositoryResult<Option<String>> {
            Ok(None)
        }

        async fn delete_by_id(&self, _id: &str) -> RepositoryResult<Option<String>> {
            Err(RepositoryError::connection_failed(
                RepositoryOperation::DeleteById,
                "store offline",
            ))
        }
    }

    #[tokio::test]
    async fn test_default_ping_succeeds() {
        assert!(EchoRepository.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_find_by_id_passes_raw_id() {
        let found = EchoRepository.find_by_id("raw-id").await.unwrap();
        assert_eq!(found.as_deref(), Some("raw-id"));
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let err = EchoRepository.delete_by_id("x").await.unwrap_err();
        assert_eq!(err.operation, RepositoryOperation::DeleteById);
    }
}
