//! In-memory book collection
//!
//! A document store held in process memory. It assigns ids, applies the book
//! collection schema on every write and keeps `isbn` unique. Each operation
//! takes the lock once, so inserts, updates and deletes are atomic per
//! document; concurrent updates of the same book are last-write-wins.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{Document, Repository, RepositoryResult};
use crate::models::{Book, BookId};

/// Cloneable handle to a shared in-memory book collection
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookStore {
    books: Arc<RwLock<Vec<Book>>>,
}

impl InMemoryBookStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `books`, kept in the given order
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books.into_iter().collect())),
        }
    }

    /// Number of stored books
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    /// Whether the store holds no books
    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

fn parse_id(operation: RepositoryOperation, raw: &str) -> RepositoryResult<BookId> {
    raw.parse()
        .map_err(|_| RepositoryError::invalid_id(operation, raw))
}

/// Reject `candidate` if another book already carries its isbn
fn ensure_unique_isbn(
    books: &[Book],
    candidate: &Book,
    operation: RepositoryOperation,
) -> RepositoryResult<()> {
    let Some(isbn) = &candidate.isbn else {
        return Ok(());
    };
    let taken = books
        .iter()
        .any(|book| book.id != candidate.id && book.isbn.as_ref() == Some(isbn));
    if taken {
        return Err(RepositoryError::already_exists(operation, "isbn", isbn.as_str()));
    }
    Ok(())
}

impl Repository<Book> for InMemoryBookStore {
    async fn find_all(&self) -> RepositoryResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Book>> {
        let id = parse_id(RepositoryOperation::FindById, id)?;
        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.id == id).cloned())
    }

    async fn insert(&self, document: Document) -> RepositoryResult<Book> {
        let operation = RepositoryOperation::Insert;
        let book = Book::from_document(BookId::new(), &document)
            .map_err(|violation| RepositoryError::from((operation, violation)))?;

        let mut books = self.books.write().await;
        ensure_unique_isbn(&books, &book, operation)?;
        books.push(book.clone());

        tracing::debug!(book_id = %book.id, "Inserted book document");
        Ok(book)
    }

    async fn update_by_id(&self, id: &str, document: Document) -> RepositoryResult<Option<Book>> {
        let operation = RepositoryOperation::UpdateById;
        let id = parse_id(operation, id)?;

        let mut books = self.books.write().await;
        let Some(index) = books.iter().position(|book| book.id == id) else {
            return Ok(None);
        };

        let updated = books[index]
            .merged_with(&document)
            .map_err(|violation| RepositoryError::from((operation, violation)))?;
        ensure_unique_isbn(&books, &updated, operation)?;
        books[index] = updated.clone();

        tracing::debug!(book_id = %id, "Updated book document");
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<Option<Book>> {
        let id = parse_id(RepositoryOperation::DeleteById, id)?;

        let mut books = self.books.write().await;
        let removed = books
            .iter()
            .position(|book| book.id == id)
            .map(|index| books.remove(index));

        if removed.is_some() {
            tracing::debug!(book_id = %id, "Deleted book document");
        }
        Ok(removed)
    }
}
