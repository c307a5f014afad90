//! Book collection handlers
//!
//! [`BookHandler`] maps each REST operation onto exactly one gateway call.
//! Create is the only operation that validates its payload before reaching
//! the store; update relies on the collection schema enforced by the store.

use std::sync::Arc;

use serde_json::Value;

use super::error::{ApiError, ApiOperation};
use super::response::{ItemResponse, ListResponse, MessageResponse};
use super::traits::CollectionHandler;
use crate::models::{value_kind, Book};
use crate::repository::Repository;

const ENTITY: &str = "Book";

/// Handler set for `/api/books`, generic over the persistence gateway
#[derive(Debug)]
pub struct BookHandler<R> {
    repository: Arc<R>,
}

impl<R> Clone for BookHandler<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> BookHandler<R>
where
    R: Repository<Book>,
{
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }

    /// Build a handler over an already shared gateway
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// The gateway this handler talks to
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }
}

/// JSON truthiness: `null`, `false`, `0`, `""` and absent values are falsy
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Pre-validation for create payloads
///
/// `title`, `author` and `publishedYear` must be truthy and `publishedYear`
/// must be a JSON number; numeric text such as `"2022"` does not count.
fn validate_new_book(payload: &Value) -> Result<(), ApiError> {
    let title = payload.get("title");
    let author = payload.get("author");
    let year = payload.get("publishedYear");

    let valid = is_truthy(title)
        && is_truthy(author)
        && is_truthy(year)
        && year.is_some_and(Value::is_number);

    if !valid {
        tracing::warn!(
            title = ?title,
            author = ?author,
            published_year = ?year,
            published_year_type = year.map_or("undefined", value_kind),
            "Book payload failed validation"
        );
        return Err(ApiError::validation());
    }
    Ok(())
}

impl<R> CollectionHandler<String, Book, Value, Value> for BookHandler<R>
where
    R: Repository<Book>,
{
    async fn list(&self) -> Result<ListResponse<Book>, ApiError> {
        tracing::debug!("Listing books");
        let books = self.repository.find_all().await?;
        Ok(ListResponse::new(books))
    }

    async fn get(&self, id: String) -> Result<ItemResponse<Book>, ApiError> {
        tracing::debug!(book_id = %id, "Fetching book");
        self.repository
            .find_by_id(&id)
            .await?
            .map(ItemResponse::ok)
            .ok_or_else(|| ApiError::not_found(ApiOperation::Get, ENTITY, id))
    }

    async fn create(&self, payload: Value) -> Result<ItemResponse<Book>, ApiError> {
        tracing::debug!(payload = %payload, "Creating book");
        validate_new_book(&payload)?;

        let book = self.repository.insert(payload).await?;
        tracing::info!(book_id = %book.id, title = %book.title, "Book created");
        Ok(ItemResponse::created(book))
    }

    async fn update(&self, id: String, payload: Value) -> Result<ItemResponse<Book>, ApiError> {
        tracing::debug!(book_id = %id, "Updating book");
        let book = self
            .repository
            .update_by_id(&id, payload)
            .await?
            .ok_or_else(|| ApiError::not_found(ApiOperation::Update, ENTITY, id))?;

        tracing::info!(book_id = %book.id, "Book updated");
        Ok(ItemResponse::ok(book))
    }

    async fn delete(&self, id: String) -> Result<MessageResponse, ApiError> {
        tracing::debug!(book_id = %id, "Deleting book");
        match self.repository.delete_by_id(&id).await? {
            Some(book) => {
                tracing::info!(book_id = %book.id, "Book deleted");
                Ok(MessageResponse::new("Book deleted"))
            }
            None => Err(ApiError::not_found(ApiOperation::Delete, ENTITY, id)),
        }
    }
}
