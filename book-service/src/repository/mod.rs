//! Persistence gateway for the book collection
//!
//! - [`Repository`]: the document-store contract the handlers consume
//! - [`RepositoryError`]: structured failures with operation context
//! - [`InMemoryBookStore`]: process-local store implementing the contract
//!
//! # Example
//!
//! ```rust
//! use book_service::repository::{InMemoryBookStore, Repository};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = InMemoryBookStore::new();
//! let book = store
//!     .insert(json!({ "title": "Dune", "author": "Herbert", "publishedYear": 1965 }))
//!     .await
//!     .unwrap();
//! assert!(store.find_by_id(&book.id.to_string()).await.unwrap().is_some());
//! # }
//! ```

mod error;
mod memory;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::InMemoryBookStore;
pub use traits::{Document, Repository, RepositoryResult};
